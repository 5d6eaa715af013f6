use serde::de::{self, value::StrDeserializer, IntoDeserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Type-safe color enum instead of strings.
///
/// Options and status groups use the ten foreground colors; text
/// annotations may also carry the `*_background` variants. A color string the
/// client does not know decodes to [`Color::Unsupported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
    GrayBackground,
    BrownBackground,
    OrangeBackground,
    YellowBackground,
    GreenBackground,
    BlueBackground,
    PurpleBackground,
    PinkBackground,
    RedBackground,
    #[serde(other)]
    Unsupported,
}

impl Color {
    /// Maps a wire color string to its symbol. Never fails.
    pub fn from_wire(s: &str) -> Self {
        let deserializer: StrDeserializer<'_, de::value::Error> = s.into_deserializer();
        match Color::deserialize(deserializer) {
            Ok(Color::Unsupported) | Err(_) => {
                log::warn!("Unknown color '{}', treating as unsupported", s);
                Color::Unsupported
            }
            Ok(color) => color,
        }
    }

    /// The wire string for this color. `Unsupported` is written as `default`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Default | Color::Unsupported => "default",
            Color::Gray => "gray",
            Color::Brown => "brown",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::Red => "red",
            Color::GrayBackground => "gray_background",
            Color::BrownBackground => "brown_background",
            Color::OrangeBackground => "orange_background",
            Color::YellowBackground => "yellow_background",
            Color::GreenBackground => "green_background",
            Color::BlueBackground => "blue_background",
            Color::PurpleBackground => "purple_background",
            Color::PinkBackground => "pink_background",
            Color::RedBackground => "red_background",
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
