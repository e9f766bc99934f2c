use cosmwasm_std::{Addr, Decimal};
use omniflix_std::types::cosmos::base::v1beta1::Coin;
use omniflix_std::types::omniflix::onft::v1beta1::{
    Metadata, MsgCreateDenom, MsgMintOnft, WeightedAddress,
};
use pulse_types::minter::CollectionDetails;

pub fn generate_create_denom_msg(
    collection: &CollectionDetails,
    minter_address: Addr,
    creation_fee: Coin,
    admin: Addr,
) -> MsgCreateDenom {
    MsgCreateDenom {
        creation_fee: Some(creation_fee),
        id: collection.id.clone(),
        symbol: collection.symbol.clone(),
        name: collection.collection_name.clone(),
        description: collection.description.clone().unwrap_or_default(),
        preview_uri: collection.preview_uri.clone().unwrap_or_default(),
        schema: collection.schema.clone().unwrap_or_default(),
        sender: minter_address.into_string(),
        uri: collection.uri.clone().unwrap_or_default(),
        uri_hash: collection.uri_hash.clone().unwrap_or_default(),
        data: collection.data.clone().unwrap_or_default(),
        royalty_receivers: vec![WeightedAddress {
            address: admin.into_string(),
            weight: Decimal::one().to_string(),
        }],
    }
}

pub fn generate_mint_msg(
    collection: &CollectionDetails,
    token_id: u64,
    minter_address: Addr,
    recipient: Addr,
) -> MsgMintOnft {
    let metadata = Metadata {
        name: format!("{} #{}", collection.token_name, token_id),
        description: collection.description.clone().unwrap_or_default(),
        media_uri: format!("{}/{}", collection.base_token_uri, token_id),
        preview_uri: format!(
            "{}/{}",
            collection
                .preview_uri
                .clone()
                .unwrap_or(collection.base_token_uri.clone()),
            token_id
        ),
        uri_hash: collection.uri_hash.clone().unwrap_or_default(),
    };

    MsgMintOnft {
        data: String::new(),
        id: token_id.to_string(),
        metadata: Some(metadata),
        denom_id: collection.id.clone(),
        transferable: collection.transferable,
        sender: minter_address.into_string(),
        extensible: false,
        nsfw: false,
        recipient: recipient.into_string(),
        royalty_share: Decimal::zero().atomics().to_string(),
    }
}
