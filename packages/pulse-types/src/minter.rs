use std::fmt;

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

/// First id of the reserved (sparker) domain. Public ids stay strictly below it.
pub const RESERVED_BASE: u64 = 1_000_000_000_000_000;

#[cw_serde]
#[derive(Copy, Eq)]
pub enum Capability {
    Admin,
    Sales,
    Reserved,
    /// Administers `Sales` once the sales caller is frozen. Never grantable.
    FrozenSalesAdmin,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Admin => "admin",
            Capability::Sales => "sales",
            Capability::Reserved => "reserved",
            Capability::FrozenSalesAdmin => "frozen_sales_admin",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cw_serde]
pub struct MinterState {
    pub next_public_id: u64,
    pub reserved_cap: u64,
    pub reserved_remaining: u64,
    pub sales_caller: Option<Addr>,
    pub sales_caller_frozen: bool,
}

impl MinterState {
    pub fn new(first_public_id: u64, reserved_cap: u64) -> Self {
        MinterState {
            next_public_id: first_public_id,
            reserved_cap,
            reserved_remaining: reserved_cap,
            sales_caller: None,
            sales_caller_frozen: false,
        }
    }
}

/// Collection created on the ONFT ledger at instantiation.
#[cw_serde]
pub struct CollectionDetails {
    pub id: String,
    pub symbol: String,
    pub collection_name: String,
    pub description: Option<String>,
    pub preview_uri: Option<String>,
    pub schema: Option<String>,
    pub uri: Option<String>,
    pub uri_hash: Option<String>,
    pub data: Option<String>,
    // Each token is named "<token_name> #<id>" and points at "<base_token_uri>/<id>"
    pub token_name: String,
    pub base_token_uri: String,
    pub transferable: bool,
}

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: Option<String>,
    pub first_public_id: u64,
    pub reserved_cap: u64,
    pub collection: CollectionDetails,
}

#[cw_serde]
pub enum ExecuteMsg {
    MintPublic {
        recipient: String,
    },
    MintSparker {
        recipient: String,
    },
    GrantCapability {
        capability: Capability,
        address: String,
    },
    RevokeCapability {
        capability: Capability,
        address: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(MinterState)]
    State {},
    #[returns(CollectionDetails)]
    Collection {},
    #[returns(bool)]
    HasCapability {
        capability: Capability,
        address: String,
    },
    #[returns(Capability)]
    CapabilityAdmin { capability: Capability },
    #[returns(bool)]
    IsFrozen { capability: Capability },
    #[returns(OwnerOfResponse)]
    OwnerOf { token_id: u64 },
}

/// Data returned by every successful mint.
#[cw_serde]
pub struct MintResponse {
    pub token_id: u64,
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: String,
}
