use anyhow::{bail, Result};
use cosmwasm_std::{from_json, to_json_binary, Addr, Api, Binary, BlockInfo, Querier, Storage};
use cw_multi_test::{error::AnyResult, AppResponse, CosmosRouter, Stargate};
use omniflix_std::types::omniflix::onft::v1beta1::{
    Collection, Denom, MsgCreateDenom, MsgMintOnft, QueryOnftRequest, QueryOnftResponse,
};
use omniflix_std::types::{
    cosmos::base::v1beta1::Coin,
    omniflix::onft::v1beta1::{Onft, Params, QueryParamsResponse},
};
use prost::Message;

const COLLECTION_PREFIX: &str = "collection";

pub const CREATE_DENOM_TYPE_URL: &str = "/OmniFlix.onft.v1beta1.MsgCreateDenom";
pub const MINT_ONFT_TYPE_URL: &str = "/OmniFlix.onft.v1beta1.MsgMintONFT";
pub const PARAMS_QUERY_PATH: &str = "/OmniFlix.onft.v1beta1.Query/Params";
pub const ONFT_QUERY_PATH: &str = "/OmniFlix.onft.v1beta1.Query/ONFT";

pub const DENOM_CREATION_FEE: u128 = 1_000_000;
pub const DENOM_CREATION_FEE_DENOM: &str = "uflix";

pub fn collection_key(denom_id: &str) -> String {
    format!("collections:{}:{}", COLLECTION_PREFIX, denom_id)
}

/// Emulates the ONFT module. Recipients listed in `rejecting_recipients`
/// refuse delivery, which fails the mint like a rejecting receiver would.
#[derive(Default)]
pub struct StargateKeeper {
    pub rejecting_recipients: Vec<String>,
}

impl StargateKeeper {
    pub fn new(rejecting_recipients: Vec<String>) -> Self {
        StargateKeeper {
            rejecting_recipients,
        }
    }

    fn load_collection(storage: &dyn Storage, denom_id: &str) -> Result<Collection> {
        match storage.get(collection_key(denom_id).as_bytes()) {
            Some(raw) => Ok(from_json(raw)?),
            None => bail!("denom {} not found", denom_id),
        }
    }

    fn create_denom(
        &self,
        storage: &mut dyn Storage,
        sender: &Addr,
        msg: MsgCreateDenom,
    ) -> Result<()> {
        let key = collection_key(&msg.id);
        if storage.get(key.as_bytes()).is_some() {
            bail!("denom {} already exists", msg.id);
        }
        let collection = Collection {
            denom: Some(Denom {
                creator: sender.to_string(),
                data: msg.data,
                name: msg.name,
                id: msg.id,
                preview_uri: msg.preview_uri,
                description: msg.description,
                schema: msg.schema,
                symbol: msg.symbol,
                uri: msg.uri,
                uri_hash: msg.uri_hash,
                royalty_receivers: msg.royalty_receivers,
            }),
            onfts: vec![],
        };
        storage.set(key.as_bytes(), &to_json_binary(&collection)?);
        Ok(())
    }

    fn mint_onft(
        &self,
        storage: &mut dyn Storage,
        sender: &Addr,
        msg: MsgMintOnft,
    ) -> Result<()> {
        let mut collection = Self::load_collection(storage, &msg.denom_id)?;
        let creator = collection
            .denom
            .as_ref()
            .map(|denom| denom.creator.clone())
            .unwrap_or_default();
        if creator != sender.as_str() {
            bail!("{} is not the creator of denom {}", sender, msg.denom_id);
        }
        if collection.onfts.iter().any(|onft| onft.id == msg.id) {
            bail!("onft {} already exists in {}", msg.id, msg.denom_id);
        }
        if self.rejecting_recipients.contains(&msg.recipient) {
            bail!("recipient {} rejected onft {}", msg.recipient, msg.id);
        }
        collection.onfts.push(Onft {
            id: msg.id,
            created_at: None,
            nsfw: msg.nsfw,
            owner: msg.recipient,
            data: msg.data,
            transferable: msg.transferable,
            extensible: msg.extensible,
            metadata: msg.metadata,
            royalty_share: msg.royalty_share,
        });
        storage.set(
            collection_key(&msg.denom_id).as_bytes(),
            &to_json_binary(&collection)?,
        );
        Ok(())
    }
}

impl Stargate for StargateKeeper {
    fn execute<ExecC, QueryC>(
        &self,
        _api: &dyn Api,
        storage: &mut dyn Storage,
        _router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        _block: &BlockInfo,
        sender: Addr,
        type_url: String,
        value: Binary,
    ) -> AnyResult<AppResponse> {
        if type_url == CREATE_DENOM_TYPE_URL {
            let msg = MsgCreateDenom::decode(value.as_slice())?;
            self.create_denom(storage, &sender, msg)?;
        }
        if type_url == MINT_ONFT_TYPE_URL {
            let msg = MsgMintOnft::decode(value.as_slice())?;
            self.mint_onft(storage, &sender, msg)?;
        }
        Ok(AppResponse::default())
    }

    fn query(
        &self,
        _api: &dyn Api,
        storage: &dyn Storage,
        _querier: &dyn Querier,
        _block: &BlockInfo,
        path: String,
        data: Binary,
    ) -> AnyResult<Binary> {
        if path == PARAMS_QUERY_PATH {
            let params = QueryParamsResponse {
                params: Some(Params {
                    denom_creation_fee: Some(Coin {
                        denom: DENOM_CREATION_FEE_DENOM.to_string(),
                        amount: DENOM_CREATION_FEE.to_string(),
                    }),
                }),
            };
            return Ok(to_json_binary(&params)?);
        }
        if path == ONFT_QUERY_PATH {
            let request = QueryOnftRequest::decode(data.as_slice())?;
            let collection = Self::load_collection(storage, &request.denom_id)?;
            let onft = collection
                .onfts
                .into_iter()
                .find(|onft| onft.id == request.id);
            return Ok(to_json_binary(&QueryOnftResponse { onft })?);
        }
        Ok(data)
    }
}

/// Reads the stored collection, bypassing the contracts.
pub fn query_onft_collection(storage: &dyn Storage, denom_id: &str) -> Option<Collection> {
    storage
        .get(collection_key(denom_id).as_bytes())
        .and_then(|raw| from_json(raw).ok())
}
