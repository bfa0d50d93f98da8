use serde::{Deserialize, Serialize};
use utility::serde::{lenient_count, one_or_many};

/// One entry of `items`. Field names differ between releases of the API, so
/// items are kept as plain JSON objects.
pub type Item = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub response: ResponseEnvelope,
}

impl ForecastResponse {
    pub fn from_items(items: Vec<Item>, total_count: Option<u64>) -> Self {
        Self {
            response: ResponseEnvelope {
                header: None,
                body: ResponseBody {
                    items: Items { item: items },
                    total_count,
                    ..Default::default()
                },
            },
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.response.body.items.item
    }

    pub fn into_items(self) -> Vec<Item> {
        self.response.body.items.item
    }

    pub fn total_count(&self) -> Option<u64> {
        self.response.body.total_count
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<ResponseHeader>,
    #[serde(default)]
    pub body: ResponseBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseHeader {
    #[serde(default)]
    pub result_code: Option<String>,
    #[serde(default)]
    pub result_msg: Option<String>,
}

impl ResponseHeader {
    /// `00` is the only success code of the portal. A missing code is taken
    /// as success.
    pub fn is_success(&self) -> bool {
        self.result_code
            .as_deref()
            .map_or(true, |code| matches!(code.trim(), "00" | "0"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default)]
    pub items: Items,
    #[serde(
        default,
        deserialize_with = "lenient_count::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_count: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient_count::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub page_no: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient_count::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub num_of_rows: Option<u64>,
}

/// Always written as `{"item": [...]}`. Read from that form, from a single
/// wrapped item, from a bare list, from `""` and from `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ItemsRepr")]
pub struct Items {
    pub item: Vec<Item>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsRepr {
    // must come before `Wrapped`, which would accept a list as well
    List(Vec<Item>),
    Wrapped {
        #[serde(default, deserialize_with = "one_or_many::deserialize")]
        item: Vec<Item>,
    },
    Blank(String),
    Null,
}

impl From<ItemsRepr> for Items {
    fn from(repr: ItemsRepr) -> Self {
        let item = match repr {
            ItemsRepr::List(item) | ItemsRepr::Wrapped { item } => item,
            ItemsRepr::Blank(_) | ItemsRepr::Null => Vec::new(),
        };
        Items { item }
    }
}
