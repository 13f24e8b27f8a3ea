//! # Call Dispatcher
//!
//! Maps the public operation names the host uses (`add-manufacturer`,
//! `register-product`, ...) onto [`ProductRegistryApi`] and folds each
//! result into a [`CallReceipt`] carrying either the output or the stable
//! numeric error code.
//!
//! ## Wire Format
//!
//! ```json
//! { "function": "transfer-ownership",
//!   "args": { "product_id": "PROD123", "new_owner": "0x0202..." } }
//! ```

use crate::domain::{HistoryEntry, ProductRecord};
use crate::ports::inbound::ProductRegistryApi;
use serde::{Deserialize, Serialize};
use shared_types::{Address, CallContext};

/// One call to the registry, by public operation name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "function", content = "args", rename_all = "kebab-case")]
pub enum ContractCall {
    /// Owner authorizes a manufacturer.
    AddManufacturer { candidate: Address },
    /// Manufacturer registers a product.
    RegisterProduct {
        product_id: String,
        description: String,
    },
    /// Anyone checks a product.
    VerifyProduct { product_id: String },
    /// Current owner hands a product on.
    TransferOwnership {
        product_id: String,
        new_owner: Address,
    },
    /// Anyone reads a product's provenance.
    GetOwnershipHistory { product_id: String },
    /// Anyone reads a product's owner.
    GetProductOwner { product_id: String },
}

impl ContractCall {
    /// Public operation name.
    #[must_use]
    pub fn function_name(&self) -> &'static str {
        match self {
            Self::AddManufacturer { .. } => "add-manufacturer",
            Self::RegisterProduct { .. } => "register-product",
            Self::VerifyProduct { .. } => "verify-product",
            Self::TransferOwnership { .. } => "transfer-ownership",
            Self::GetOwnershipHistory { .. } => "get-ownership-history",
            Self::GetProductOwner { .. } => "get-product-owner",
        }
    }

    /// True for calls that never change state.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Self::VerifyProduct { .. }
                | Self::GetOwnershipHistory { .. }
                | Self::GetProductOwner { .. }
        )
    }
}

/// Successful call output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CallOutput {
    /// `add-manufacturer`: whether the candidate was newly added.
    ManufacturerAdded(bool),
    /// `register-product` and `verify-product`.
    Record(ProductRecord),
    /// `transfer-ownership`.
    Transferred,
    /// `get-ownership-history`.
    History(Vec<HistoryEntry>),
    /// `get-product-owner`.
    Owner(Address),
}

/// Outcome of one dispatched call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallReceipt {
    /// Public operation name.
    pub function: String,
    /// Authenticated caller.
    pub caller: Address,
    /// Output, or the stable error code.
    pub result: Result<CallOutput, u32>,
}

impl CallReceipt {
    /// True if the call succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Error code, if the call failed.
    #[must_use]
    pub fn error_code(&self) -> Option<u32> {
        self.result.as_ref().err().copied()
    }
}

/// Run one call as one atomic unit and produce its receipt.
pub fn dispatch<R>(registry: &R, ctx: &CallContext, call: &ContractCall) -> CallReceipt
where
    R: ProductRegistryApi + ?Sized,
{
    let result = match call {
        ContractCall::AddManufacturer { candidate } => registry
            .add_manufacturer(ctx, *candidate)
            .map(CallOutput::ManufacturerAdded),
        ContractCall::RegisterProduct {
            product_id,
            description,
        } => registry
            .register_product(ctx, product_id, description)
            .map(CallOutput::Record),
        ContractCall::VerifyProduct { product_id } => {
            registry.verify_product(product_id).map(CallOutput::Record)
        }
        ContractCall::TransferOwnership {
            product_id,
            new_owner,
        } => registry
            .transfer_ownership(ctx, product_id, *new_owner)
            .map(|()| CallOutput::Transferred),
        ContractCall::GetOwnershipHistory { product_id } => registry
            .get_ownership_history(product_id)
            .map(CallOutput::History),
        ContractCall::GetProductOwner { product_id } => {
            registry.get_product_owner(product_id).map(CallOutput::Owner)
        }
    };

    CallReceipt {
        function: call.function_name().to_string(),
        caller: ctx.caller,
        result: result.map_err(|e| e.code()),
    }
}
