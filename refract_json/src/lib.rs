use std::{error::Error, path::PathBuf};

use refract::{Fibre, Float, RefractiveIndices};

pub use serde_json;

pub trait JsonSer {
    /// Serialize `self` into a JSON object.
    fn to_json(&self) -> serde_json::Value;
}

pub trait JsonDes {
    /// Deserialize from a JSON object.
    ///
    /// Returns an error if `json`'s format or values are invalid.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>>
    where
        Self: Sized;
}

fn json_float(json: &serde_json::Value, field: &str) -> Result<Float, Box<dyn Error>> {
    json.get(field)
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| format!("expected a numeric {field:?} field").into())
}

impl JsonDes for RefractiveIndices {
    /// Deserialize a pair of refractive indices from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "core": 1.5, // n1, must be positive
    ///     "cladding": 1.0, // n2, must be positive
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let core = json_float(json, "core")?;
        let cladding = json_float(json, "cladding")?;

        Self::try_new(core, cladding).ok_or("refractive indices must be positive".into())
    }
}

impl JsonSer for RefractiveIndices {
    /// Serialize a pair of refractive indices into a JSON object.
    ///
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "core": self.core(),
            "cladding": self.cladding(),
        })
    }
}

impl JsonDes for Fibre {
    /// Deserialize a fibre geometry from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "top": 200.0,
    ///     "bottom": 400.0, // must be greater than "top"
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let top = json_float(json, "top")?;
        let bottom = json_float(json, "bottom")?;

        Self::try_new(top, bottom).ok_or("fibre top must lie above its bottom".into())
    }
}

impl JsonSer for Fibre {
    /// Serialize a fibre geometry into a JSON object.
    ///
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "top": self.top(),
            "bottom": self.bottom(),
        })
    }
}

/// Everything a single run needs: launch angle, indices, geometry, and an
/// optional on-disk font for the angle readout.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    angle: Float,
    pub indices: RefractiveIndices,
    pub fibre: Fibre,
    pub font: Option<PathBuf>,
}

impl Scene {
    /// `angle` is the launch angle in degrees, measured from the fibre axis.
    /// Returns `None` if it lies outside `[0, 90]`.
    #[inline]
    pub fn try_new(angle: Float, indices: RefractiveIndices, fibre: Fibre) -> Option<Self> {
        (0.0..=90.0).contains(&angle).then_some(Self {
            angle,
            indices,
            fibre,
            font: None,
        })
    }

    #[inline]
    pub fn angle(&self) -> Float {
        self.angle
    }
}

impl JsonDes for Scene {
    /// Deserialize a scene from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "angle": 30.0, // launch angle in degrees, within [0, 90]
    ///     "indices": // see RefractiveIndices::from_json
    ///     "fibre": // optional, see Fibre::from_json
    ///     "font": "path/to/font.ttf", // optional
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let angle = json_float(json, "angle")?;

        let indices =
            RefractiveIndices::from_json(json.get("indices").ok_or("missing indices")?)?;

        let fibre = match json.get("fibre") {
            Some(json) => Fibre::from_json(json)?,
            None => Fibre::default(),
        };

        let mut scene = Self::try_new(angle, indices, fibre)
            .ok_or_else(|| format!("launch angle must lie within [0, 90], got {angle}"))?;

        scene.font = json
            .get("font")
            .map(|value| {
                value
                    .as_str()
                    .map(PathBuf::from)
                    .ok_or("the font field must be a path string")
            })
            .transpose()?;

        Ok(scene)
    }
}

impl JsonSer for Scene {
    /// Serialize a scene into a JSON object.
    ///
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        let mut json = serde_json::json!({
            "angle": self.angle,
            "indices": self.indices.to_json(),
            "fibre": self.fibre.to_json(),
        });

        if let Some(font) = &self.font {
            json["font"] = serde_json::Value::from(font.display().to_string());
        }

        json
    }
}
