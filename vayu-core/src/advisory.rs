use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::model::FeatureVector;

/// The three advisory labels the service can answer with.
///
/// Wire codes (0, 1, 2) and the attached texts are fixed product strings;
/// front-ends key off both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum Advisory {
    Safe,
    Mask,
    StayIndoors,
}

impl TryFrom<u8> for Advisory {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Advisory::Safe),
            1 => Ok(Advisory::Mask),
            2 => Ok(Advisory::StayIndoors),
            other => Err(format!("advisory label must be 0, 1 or 2, got {other}")),
        }
    }
}

impl Advisory {
    pub fn code(&self) -> u8 {
        match self {
            Advisory::Safe => 0,
            Advisory::Mask => 1,
            Advisory::StayIndoors => 2,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Advisory::Safe => "Air quality acceptable — okay to go outside.",
            Advisory::Mask => "Unhealthy for sensitive groups — consider wearing a mask.",
            Advisory::StayIndoors => {
                "Very unhealthy/hazardous — stay indoors and avoid outdoor exertion."
            }
        }
    }
}

/// Classify a feature vector, preferring the loaded model artifact and
/// falling back to the deterministic rule set when none is loaded.
pub fn classify(features: &FeatureVector, model: Option<&AdvisoryModel>) -> Advisory {
    match model {
        Some(model) => model.predict(features),
        None => fallback_advisory(features),
    }
}

/// Rule-based advisory, evaluated in order, first match wins.
pub fn fallback_advisory(f: &FeatureVector) -> Advisory {
    if f.aqi > 300.0 || f.pm2_5 > 150.0 {
        Advisory::StayIndoors
    } else if (f.aqi > 150.0 || f.pm2_5 > 75.0) && (f.age > 60 || f.asthma) {
        Advisory::StayIndoors
    } else if f.aqi > 100.0 || f.pm2_5 > 50.0 {
        Advisory::Mask
    } else {
        Advisory::Safe
    }
}

/// A pre-trained binary decision tree, loaded from a JSON artifact.
///
/// Node shape: `{"leaf": {"label": 0|1|2}}` or `{"split": {"feature": 0..4,
/// "threshold": f, "left": .., "right": ..}}` with feature order
/// `[aqi, pm2_5, temp, age, asthma]`. The artifact is validated on load so
/// prediction is total afterwards.
#[derive(Debug, Clone)]
pub struct AdvisoryModel {
    root: TreeNode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TreeNode {
    Leaf {
        label: Advisory,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl AdvisoryModel {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read model artifact {}: {e}", path.display()))
        })?;
        let root: TreeNode = serde_json::from_str(&raw).map_err(|e| {
            Error::Config(format!("failed to parse model artifact {}: {e}", path.display()))
        })?;
        validate_features(&root)?;
        Ok(Self { root })
    }

    pub fn predict(&self, features: &FeatureVector) -> Advisory {
        let values = features.as_array();
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { label } => return *label,
                TreeNode::Split { feature, threshold, left, right } => {
                    // sklearn convention: values <= threshold descend left.
                    node = if values[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }
}

fn validate_features(node: &TreeNode) -> Result<(), Error> {
    match node {
        TreeNode::Leaf { .. } => Ok(()),
        TreeNode::Split { feature, left, right, .. } => {
            if *feature >= FeatureVector::default().as_array().len() {
                return Err(Error::Config(format!(
                    "model artifact references feature index {feature}, expected 0..=4"
                )));
            }
            validate_features(left)?;
            validate_features(right)
        }
    }
}
