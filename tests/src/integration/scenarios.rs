//! # Registry Scenarios
//!
//! End-to-end walkthroughs of the deployed registry, driven through the
//! public dispatcher the way a host would.
//!
//! ## Accounts
//!
//! - `deployer` - registry owner
//! - `wallet_1` - manufacturer
//! - `wallet_2`, `wallet_3` - downstream owners

#[cfg(test)]
mod tests {
    use shared_types::{Address, CallContext};
    use vt_product_registry::prelude::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn deployer() -> Address {
        Address::repeat_byte(0xD0)
    }

    fn wallet(n: u8) -> Address {
        Address::repeat_byte(n)
    }

    /// Apply one call in block `height` and return its receipt.
    fn call(
        registry: &RegistryService<InMemoryEventSink>,
        caller: Address,
        height: u64,
        call: ContractCall,
    ) -> CallReceipt {
        dispatch(registry, &CallContext::new(caller, height), &call)
    }

    fn register(id: &str) -> ContractCall {
        ContractCall::RegisterProduct {
            product_id: id.to_string(),
            description: "Authentic Product XYZ".to_string(),
        }
    }

    fn transfer(id: &str, to: Address) -> ContractCall {
        ContractCall::TransferOwnership {
            product_id: id.to_string(),
            new_owner: to,
        }
    }

    fn history_owners(registry: &RegistryService<InMemoryEventSink>, id: &str) -> Vec<Address> {
        registry
            .get_ownership_history(id)
            .unwrap()
            .into_iter()
            .map(|entry| entry.owner)
            .collect()
    }

    /// Deployed registry where `wallet_1` is a manufacturer and owns PROD123.
    fn registry_with_product() -> RegistryService<InMemoryEventSink> {
        let registry = create_test_service(deployer());
        assert!(call(
            &registry,
            deployer(),
            1,
            ContractCall::AddManufacturer {
                candidate: wallet(1)
            }
        )
        .is_ok());
        assert!(call(&registry, wallet(1), 2, register("PROD123")).is_ok());
        registry
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[test]
    fn test_only_owner_can_add_manufacturer() {
        let registry = create_test_service(deployer());

        let ok = call(
            &registry,
            deployer(),
            1,
            ContractCall::AddManufacturer {
                candidate: wallet(1),
            },
        );
        assert_eq!(ok.result, Ok(CallOutput::ManufacturerAdded(true)));

        let denied = call(
            &registry,
            wallet(1),
            2,
            ContractCall::AddManufacturer {
                candidate: wallet(2),
            },
        );
        assert_eq!(denied.error_code(), Some(codes::NOT_OWNER));
        assert_eq!(registry.manufacturers(), vec![wallet(1)]);
    }

    #[test]
    fn test_register_then_verify() {
        let registry = registry_with_product();

        let receipt = call(
            &registry,
            wallet(3),
            3,
            ContractCall::VerifyProduct {
                product_id: "PROD123".into(),
            },
        );
        let Ok(CallOutput::Record(record)) = &receipt.result else {
            panic!("expected a product record, got {:?}", receipt.result);
        };
        assert_eq!(record.description.as_str(), "Authentic Product XYZ");
        assert_eq!(record.manufacturer, wallet(1));
        assert_eq!(record.current_owner, wallet(1));
        assert_eq!(record.registered_at, 2);
        assert_eq!(record.transfer_count, 0);
    }

    #[test]
    fn test_transfer_chain_history() {
        let registry = registry_with_product();

        assert!(call(&registry, wallet(1), 3, transfer("PROD123", wallet(2))).is_ok());
        assert!(call(&registry, wallet(2), 4, transfer("PROD123", wallet(3))).is_ok());

        assert_eq!(
            history_owners(&registry, "PROD123"),
            vec![wallet(1), wallet(2), wallet(3)]
        );

        let heights: Vec<u64> = registry
            .get_ownership_history("PROD123")
            .unwrap()
            .iter()
            .map(|entry| entry.block_height)
            .collect();
        assert_eq!(heights, vec![2, 3, 4]);
        assert!(registry
            .verify_history_integrity("PROD123")
            .unwrap()
            .is_valid());
    }

    #[test]
    fn test_owner_after_transfer() {
        let registry = registry_with_product();
        assert!(call(&registry, wallet(1), 3, transfer("PROD123", wallet(2))).is_ok());

        let receipt = call(
            &registry,
            deployer(),
            4,
            ContractCall::GetProductOwner {
                product_id: "PROD123".into(),
            },
        );
        assert_eq!(receipt.result, Ok(CallOutput::Owner(wallet(2))));
    }

    #[test]
    fn test_deployer_cannot_transfer_foreign_product() {
        let registry = registry_with_product();
        let before = registry.snapshot();

        let receipt = call(&registry, deployer(), 3, transfer("PROD123", wallet(2)));
        assert_eq!(receipt.error_code(), Some(codes::NOT_CURRENT_OWNER));

        assert_eq!(registry.get_product_owner("PROD123").unwrap(), wallet(1));
        assert_eq!(history_owners(&registry, "PROD123"), vec![wallet(1)]);
        assert_eq!(registry.snapshot(), before);
    }

    #[test]
    fn test_duplicate_registration_keeps_original() {
        let registry = registry_with_product();
        assert!(call(
            &registry,
            deployer(),
            3,
            ContractCall::AddManufacturer {
                candidate: wallet(2)
            }
        )
        .is_ok());

        let receipt = call(
            &registry,
            wallet(2),
            4,
            ContractCall::RegisterProduct {
                product_id: "PROD123".into(),
                description: "Counterfeit".into(),
            },
        );
        assert_eq!(receipt.error_code(), Some(codes::PRODUCT_EXISTS));

        let record = registry.verify_product("PROD123").unwrap();
        assert_eq!(record.manufacturer, wallet(1));
        assert_eq!(record.description.as_str(), "Authentic Product XYZ");
    }

    #[test]
    fn test_unknown_product_everywhere() {
        let registry = registry_with_product();
        let before = registry.snapshot();

        let calls = [
            ContractCall::VerifyProduct {
                product_id: "GHOST".into(),
            },
            ContractCall::GetOwnershipHistory {
                product_id: "GHOST".into(),
            },
            ContractCall::GetProductOwner {
                product_id: "GHOST".into(),
            },
            transfer("GHOST", wallet(2)),
        ];
        for c in calls {
            let receipt = call(&registry, wallet(1), 3, c);
            assert_eq!(receipt.error_code(), Some(codes::PRODUCT_NOT_FOUND));
        }
        assert_eq!(registry.snapshot(), before);
    }

    #[test]
    fn test_event_trail_matches_calls() {
        let registry = registry_with_product();
        assert!(call(&registry, wallet(1), 3, transfer("PROD123", wallet(2))).is_ok());
        // Rejected calls publish nothing
        let _ = call(&registry, wallet(1), 4, transfer("PROD123", wallet(3)));

        let events = registry.event_sink().events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].topic(), topics::MANUFACTURER);
        assert_eq!(events[1].topic(), topics::REGISTER);
        assert_eq!(events[2].topic(), topics::TRANSFER);
        assert_eq!(events[2].block_height(), 3);

        let last_hash = registry
            .get_ownership_history("PROD123")
            .unwrap()
            .last()
            .map(|entry| entry.entry_hash);
        match &events[2] {
            RegistryEvent::OwnershipTransferred { entry_hash, .. } => {
                assert_eq!(Some(*entry_hash), last_hash);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
