//! Data models for the shirt catalog pages.
//! Catalog entries mirror the JSON shape the pages consume; every field may
//! be missing and the accessors below supply the defaults the views show.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use yew::Reducible;

pub const PLACEHOLDER_IMAGE: &str = "images/placeholder.png";
pub const DEFAULT_NAME: &str = "Unnamed T-Shirt";
pub const DEFAULT_DESCRIPTION: &str = "No description available.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Front,
    Back,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Back => "back",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideImages {
    #[serde(deserialize_with = "lenient::deserialize")]
    pub front: Option<String>,
    #[serde(deserialize_with = "lenient::deserialize")]
    pub back: Option<String>,
}

impl SideImages {
    pub fn get(&self, side: Side) -> Option<&str> {
        let img = match side {
            Side::Front => self.front.as_deref(),
            Side::Back => self.back.as_deref(),
        };
        img.filter(|s| !s.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorOption {
    pub name: String,
    pub images: SideImages,
}

/// Prices show up both as numbers and as preformatted strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Label(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(v) => write!(f, "{}", v),
            Price::Label(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(deserialize_with = "lenient::or_default")]
    pub id: String,
    #[serde(deserialize_with = "lenient::deserialize")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::deserialize")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::deserialize")]
    pub price: Option<Price>,
    /// Color name -> images, in catalog order (the first one is the default).
    #[serde(with = "ordered_colors")]
    pub colors: Vec<ColorOption>,
    #[serde(deserialize_with = "lenient::deserialize")]
    pub default: Option<SideImages>,
}

impl Product {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|s| !s.is_empty()).unwrap_or(DEFAULT_NAME)
    }

    pub fn display_description(&self) -> &str {
        self.description
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_DESCRIPTION)
    }

    pub fn price_label(&self) -> String {
        match &self.price {
            Some(p) => format!("Price: {}", p),
            None => "Price: n/a".to_string(),
        }
    }

    pub fn first_color(&self) -> Option<&str> {
        self.colors.first().map(|c| c.name.as_str())
    }

    pub fn color(&self, name: &str) -> Option<&ColorOption> {
        self.colors.iter().find(|c| c.name == name)
    }

    /// Image for a color/side, falling back to the default set and then the placeholder.
    pub fn image_for(&self, color: Option<&str>, side: Side) -> String {
        color
            .and_then(|c| self.color(c))
            .and_then(|c| c.images.get(side))
            .or_else(|| self.default.as_ref().and_then(|d| d.get(side)))
            .unwrap_or(PLACEHOLDER_IMAGE)
            .to_string()
    }

    /// Listing/quick-view image: the first color's front.
    pub fn card_image(&self) -> String {
        self.image_for(self.first_color(), Side::Front)
    }
}

// Catalog fields of the wrong shape read as absent instead of failing the entry.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = serde_json::Value::deserialize(d)?;
        Ok(serde_json::from_value(value).ok())
    }

    pub fn or_default<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(deserialize(d)?.unwrap_or_default())
    }
}

mod ordered_colors {
    use super::{ColorOption, SideImages};
    use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(colors: &[ColorOption], s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(colors.len()))?;
        for c in colors {
            map.serialize_entry(&c.name, &c.images)?;
        }
        map.end()
    }

    /// Reads the color map in document order. Anything that is not a map
    /// (null, a list, a bare string) yields no colors.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<ColorOption>, D::Error> {
        struct ColorsVisitor;
        impl<'de> Visitor<'de> for ColorsVisitor {
            type Value = Vec<ColorOption>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of color name to front/back images")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = Vec::new();
                while let Some((name, raw)) = access.next_entry::<String, serde_json::Value>()? {
                    let images: SideImages = serde_json::from_value(raw).unwrap_or_default();
                    out.push(ColorOption { name, images });
                }
                Ok(out)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                while access.next_element::<IgnoredAny>()?.is_some() {}
                Ok(Vec::new())
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Vec::new())
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Vec::new())
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
                d.deserialize_any(self)
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
                Ok(Vec::new())
            }

            fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
                Ok(Vec::new())
            }

            fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
                Ok(Vec::new())
            }

            fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
                Ok(Vec::new())
            }

            fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
                Ok(Vec::new())
            }
        }
        d.deserialize_any(ColorsVisitor)
    }
}

/// Selection state of the details page.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailsState {
    pub product: Product,
    pub color: Option<String>,
    pub side: Side,
}

pub enum DetailsAction {
    SelectColor(String),
    SelectSide(Side),
}

impl DetailsState {
    pub fn new(product: Product) -> Self {
        let color = product.first_color().map(str::to_string);
        Self {
            product,
            color,
            side: Side::Front,
        }
    }

    pub fn image_src(&self) -> String {
        self.product.image_for(self.color.as_deref(), self.side)
    }

    pub fn image_alt(&self) -> String {
        format!(
            "{} - {} - {}",
            self.product.display_name(),
            self.color.as_deref().unwrap_or("default"),
            self.side.as_str()
        )
    }
}

impl Reducible for DetailsState {
    type Action = DetailsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        match action {
            DetailsAction::SelectColor(c) => {
                // only colors the product actually has
                if new.product.color(&c).is_none() {
                    return self;
                }
                new.color = Some(c);
            }
            DetailsAction::SelectSide(s) => {
                new.side = s;
            }
        }
        Rc::new(new)
    }
}
