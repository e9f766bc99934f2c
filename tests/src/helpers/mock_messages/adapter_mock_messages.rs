use pulse_types::adapter::InstantiateMsg;

pub const TOKEN_BASE: u64 = 0;
pub const EPOCH_BASE: u64 = 1;

pub fn return_adapter_instantiate_msg(minter: String) -> InstantiateMsg {
    InstantiateMsg {
        owner: Some("admin".to_string()),
        auction: None,
        minter,
        token_base: TOKEN_BASE,
        epoch_base: EPOCH_BASE,
    }
}
