// SPDX-License-Identifier: GPL-3.0-or-later
use colorous::Gradient;
use serde::de::{self, Deserialize, Deserializer};

/// Look up a colorous gradient by name.
///
/// Names are matched ignoring case, with spaces treated as underscores. The list is
/// limited to gradients that read sensibly as a temperature scale.
pub(crate) fn from_str(gradient_name: &str) -> Result<Gradient, &'static str> {
    match gradient_name.to_uppercase().replace(' ', "_").as_str() {
        "CIVIDIS" => Ok(colorous::CIVIDIS),
        "COOL" => Ok(colorous::COOL),
        "CUBEHELIX" => Ok(colorous::CUBEHELIX),
        "INFERNO" => Ok(colorous::INFERNO),
        "MAGMA" => Ok(colorous::MAGMA),
        "PLASMA" => Ok(colorous::PLASMA),
        "RAINBOW" => Ok(colorous::RAINBOW),
        "RED_YELLOW_BLUE" => Ok(colorous::RED_YELLOW_BLUE),
        "SINEBOW" => Ok(colorous::SINEBOW),
        "SPECTRAL" => Ok(colorous::SPECTRAL),
        "TURBO" => Ok(colorous::TURBO),
        "VIRIDIS" => Ok(colorous::VIRIDIS),
        "WARM" => Ok(colorous::WARM),
        _ => Err("Invalid gradient name"),
    }
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Gradient, D::Error>
where
    D: Deserializer<'de>,
{
    let gradient_name: String = Deserialize::deserialize(deserializer)?;
    from_str(&gradient_name).map_err(|_| {
        de::Error::invalid_value(
            de::Unexpected::Str(&gradient_name),
            &"the name of a colorous gradient",
        )
    })
}
