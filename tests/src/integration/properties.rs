//! # Registry Properties
//!
//! Random call sequences run against the registry and a plain reference
//! model side by side. After every call:
//!
//! - the receipt's outcome matches the model (role gating, registration
//!   gating, uniqueness, ownership gating, unknown ids)
//! - a failed or read-only call leaves the state untouched
//! - every product satisfies `history.len == 1 + transfers`,
//!   `history.last == owner`, and its hash chain verifies

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use shared_types::{Address, CallContext};
    use std::collections::{BTreeMap, BTreeSet};
    use vt_product_registry::prelude::*;

    const DEPLOYER: u8 = 0xD0;

    // =============================================================================
    // REFERENCE MODEL
    // =============================================================================

    #[derive(Debug, Default)]
    struct Model {
        manufacturers: BTreeSet<Address>,
        // id -> ordered owners
        histories: BTreeMap<String, Vec<Address>>,
    }

    impl Model {
        fn owner(&self) -> Address {
            Address::repeat_byte(DEPLOYER)
        }

        fn valid_id(id: &str) -> bool {
            !id.is_empty() && id.len() <= 32
        }

        /// Expected outcome: `Ok(())` or the error code. Updates the model
        /// on success.
        fn apply(&mut self, caller: Address, call: &ContractCall) -> Result<(), u32> {
            match call {
                ContractCall::AddManufacturer { candidate } => {
                    if caller != self.owner() {
                        return Err(codes::NOT_OWNER);
                    }
                    self.manufacturers.insert(*candidate);
                    Ok(())
                }
                ContractCall::RegisterProduct { product_id, .. } => {
                    if !self.manufacturers.contains(&caller) {
                        return Err(codes::NOT_MANUFACTURER);
                    }
                    if !Self::valid_id(product_id) {
                        return Err(codes::INVALID_PRODUCT_ID);
                    }
                    if self.histories.contains_key(product_id) {
                        return Err(codes::PRODUCT_EXISTS);
                    }
                    self.histories.insert(product_id.clone(), vec![caller]);
                    Ok(())
                }
                ContractCall::TransferOwnership {
                    product_id,
                    new_owner,
                } => {
                    let history = self
                        .histories
                        .get_mut(product_id)
                        .ok_or(codes::PRODUCT_NOT_FOUND)?;
                    if history.last() != Some(&caller) {
                        return Err(codes::NOT_CURRENT_OWNER);
                    }
                    history.push(*new_owner);
                    Ok(())
                }
                ContractCall::VerifyProduct { product_id }
                | ContractCall::GetOwnershipHistory { product_id }
                | ContractCall::GetProductOwner { product_id } => {
                    if self.histories.contains_key(product_id) {
                        Ok(())
                    } else {
                        Err(codes::PRODUCT_NOT_FOUND)
                    }
                }
            }
        }
    }

    // =============================================================================
    // STRATEGIES
    // =============================================================================

    fn actor_strategy() -> impl Strategy<Value = Address> {
        prop_oneof![
            Just(Address::repeat_byte(DEPLOYER)),
            Just(Address::repeat_byte(1)),
            Just(Address::repeat_byte(2)),
            Just(Address::repeat_byte(3)),
        ]
    }

    fn product_id_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => Just("PROD123".to_string()),
            4 => Just("PROD456".to_string()),
            2 => Just("SKU-9".to_string()),
            1 => Just(String::new()),
            1 => Just("X".repeat(33)),
        ]
    }

    fn call_strategy() -> impl Strategy<Value = ContractCall> {
        prop_oneof![
            3 => actor_strategy().prop_map(|candidate| ContractCall::AddManufacturer { candidate }),
            4 => product_id_strategy().prop_map(|product_id| ContractCall::RegisterProduct {
                product_id,
                description: "Authentic Product XYZ".to_string(),
            }),
            5 => (product_id_strategy(), actor_strategy()).prop_map(|(product_id, new_owner)| {
                ContractCall::TransferOwnership {
                    product_id,
                    new_owner,
                }
            }),
            1 => product_id_strategy().prop_map(|product_id| ContractCall::VerifyProduct { product_id }),
            1 => product_id_strategy()
                .prop_map(|product_id| ContractCall::GetOwnershipHistory { product_id }),
            1 => product_id_strategy().prop_map(|product_id| ContractCall::GetProductOwner { product_id }),
        ]
    }

    fn transaction_strategy() -> impl Strategy<Value = (Address, ContractCall)> {
        (actor_strategy(), call_strategy())
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    proptest! {
        /// Property: every receipt agrees with the reference model
        #[test]
        fn prop_outcomes_match_model(
            txs in prop::collection::vec(transaction_strategy(), 1..60)
        ) {
            let registry = create_test_service(Address::repeat_byte(DEPLOYER));
            let mut model = Model::default();

            for (height, (caller, call)) in txs.iter().enumerate() {
                let expected = model.apply(*caller, call);
                let ctx = CallContext::new(*caller, height as u64);
                let receipt = dispatch(&registry, &ctx, call);

                prop_assert_eq!(
                    receipt.error_code(),
                    expected.err(),
                    "call {:?} by {} at {}",
                    call,
                    caller,
                    height
                );
            }

            prop_assert_eq!(
                registry.manufacturers(),
                model.manufacturers.iter().copied().collect::<Vec<_>>()
            );
            prop_assert_eq!(registry.product_count(), model.histories.len());
        }

        /// Property: failed and read-only calls never change state
        #[test]
        fn prop_rejections_are_side_effect_free(
            txs in prop::collection::vec(transaction_strategy(), 1..60)
        ) {
            let registry = create_test_service(Address::repeat_byte(DEPLOYER));

            for (height, (caller, call)) in txs.iter().enumerate() {
                let before = registry.snapshot();
                let events_before = registry.event_sink().events_published();
                let receipt = dispatch(&registry, &CallContext::new(*caller, height as u64), call);

                if !receipt.is_ok() || call.is_read_only() {
                    prop_assert_eq!(&registry.snapshot(), &before);
                    prop_assert_eq!(registry.event_sink().events_published(), events_before);
                }
            }
        }

        /// Property: history shape and hash chain hold after every call
        #[test]
        fn prop_history_invariants_hold(
            txs in prop::collection::vec(transaction_strategy(), 1..60)
        ) {
            let registry = create_test_service(Address::repeat_byte(DEPLOYER));
            let mut model = Model::default();

            for (height, (caller, call)) in txs.iter().enumerate() {
                let _ = model.apply(*caller, call);
                let _ = dispatch(&registry, &CallContext::new(*caller, height as u64), call);

                for (id, owners) in &model.histories {
                    let history = registry.get_ownership_history(id).unwrap();
                    let record = registry.verify_product(id).unwrap();

                    prop_assert_eq!(history.len() as u64, 1 + record.transfer_count);
                    prop_assert_eq!(history.last().map(|e| e.owner), Some(record.current_owner));
                    prop_assert_eq!(history[0].owner, record.manufacturer);
                    prop_assert_eq!(
                        history.iter().map(|e| e.owner).collect::<Vec<_>>(),
                        owners.clone()
                    );
                    prop_assert!(registry.verify_history_integrity(id).unwrap().is_valid());
                }
            }
        }
    }
}
