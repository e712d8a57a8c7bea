use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// What the user did with a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionAction {
    Like,
    Dislike,
    View,
    ViewDetails,
    Share,
    ClickBuy,
    /// Any other action name, stored upper-cased
    Custom(String),
}

impl InteractionAction {
    /// Parse a canonical name (`like`, `CLICK_BUY`, `view-details`, ...) or one of
    /// the descriptive sentences sent by older clients.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw {
            "User liked the product" => return Self::Like,
            "User disliked the product" => return Self::Dislike,
            "User viewed product details" => return Self::ViewDetails,
            "User shared the product" => return Self::Share,
            "User clicked buy button" => return Self::ClickBuy,
            _ => {}
        }

        let normalized = raw.to_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "LIKE" => Self::Like,
            "DISLIKE" => Self::Dislike,
            "VIEW" => Self::View,
            "VIEW_DETAILS" => Self::ViewDetails,
            "SHARE" => Self::Share,
            "CLICK_BUY" => Self::ClickBuy,
            _ => Self::Custom(raw.to_uppercase()),
        }
    }

    /// Derive the action from the flag set; nothing set means a plain view
    pub fn from_flags(flags: &InteractionFlags) -> Self {
        if flags.liked == Some(true) {
            Self::Like
        } else if flags.disliked == Some(true) {
            Self::Dislike
        } else if flags.clicked_buy {
            Self::ClickBuy
        } else if flags.clicked_details {
            Self::ViewDetails
        } else if flags.clicked_share {
            Self::Share
        } else {
            Self::View
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Like => "LIKE",
            Self::Dislike => "DISLIKE",
            Self::View => "VIEW",
            Self::ViewDetails => "VIEW_DETAILS",
            Self::Share => "SHARE",
            Self::ClickBuy => "CLICK_BUY",
            Self::Custom(name) => name,
        }
    }

    /// Set the flag matching this action
    pub fn apply_to(&self, flags: &mut InteractionFlags) {
        match self {
            Self::Like => flags.liked = Some(true),
            Self::Dislike => flags.disliked = Some(true),
            Self::ViewDetails => flags.clicked_details = true,
            Self::Share => flags.clicked_share = true,
            Self::ClickBuy => flags.clicked_buy = true,
            Self::View | Self::Custom(_) => {}
        }
    }
}

impl std::fmt::Display for InteractionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionFlags {
    pub liked: Option<bool>,
    pub disliked: Option<bool>,
    pub clicked_buy: bool,
    pub clicked_details: bool,
    pub clicked_share: bool,
}

/// One row to append to `link_stduser_product`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInteraction {
    pub product_id: Uuid,
    pub user_id: Option<Uuid>,
    #[serde(flatten)]
    pub flags: InteractionFlags,
    pub action: String,
    pub anonymous_data: Option<JsonValue>,
}
