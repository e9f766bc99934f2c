use cw_storage_plus::Item;

use pulse_types::minter::{CollectionDetails, MinterState};

pub const STATE: Item<MinterState> = Item::new("minter_state");
pub const COLLECTION: Item<CollectionDetails> = Item::new("collection");
