//! JSON scene description: rooms, sources, and receivers, deserialized
//! into the domain constructors of §4.3–4.7 (spec §10.3). A thin adapter,
//! not a spec module in its own right — a host application that wants to
//! build a scene declaratively rather than through the builder API calls
//! here; everything it produces could equally be built by hand.

use serde::Deserialize;

use crate::{
    directivity::{AmbisonicConvention, Directivity, HeadRefOrientation, HrirDatabaseHandle, HrirDatabaseKind},
    error::{Result, SimError},
    point::Point,
    quaternion::Quaternion,
    receiver::Receiver,
    room::CuboidRoom,
    source::Source,
};
use aural_core::Sample;

/// Root scene description.
#[derive(Debug, Deserialize)]
pub struct SceneConfig {
    pub sampling_frequency: f64,
    #[serde(default)]
    pub room: Option<RoomConfig>,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub receivers: Vec<ReceiverConfig>,
}

#[derive(Debug, Deserialize)]
pub struct RoomConfig {
    pub dimensions: [f64; 3],
    #[serde(default)]
    pub origin: [f64; 3],
    /// Single broadband gain applied to all six walls. Per-wall,
    /// frequency-dependent filters are a code-level concern; the config
    /// layer only covers the common rigid/uniformly-absorbing case.
    #[serde(default = "default_wall_gain")]
    pub wall_gain: f64,
}

fn default_wall_gain() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    pub position: [f64; 3],
}

#[derive(Debug, Deserialize)]
pub struct ReceiverConfig {
    pub position: [f64; 3],
    #[serde(default)]
    pub orientation_axis: Option<[f64; 3]>,
    #[serde(default)]
    pub orientation_angle_deg: f64,
    #[serde(default = "default_max_waves")]
    pub max_num_incoming_waves: usize,
    pub directivity: DirectivityConfig,
}

fn default_max_waves() -> usize {
    1
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DirectivityConfig {
    Omni {
        #[serde(default = "default_gain")]
        gain: f64,
    },
    Trig {
        coefficients: Vec<f64>,
    },
    Tan {
        base_angle_deg: f64,
    },
    Ambisonic {
        max_degree: usize,
        #[serde(default)]
        convention: AmbisonicConventionConfig,
    },
    DatabaseBinaural {
        kind: HrirDatabaseKindConfig,
        directory: String,
        hrir_length: usize,
        #[serde(default)]
        head_reference: HeadRefConfig,
        #[serde(default)]
        update_length_samples: usize,
    },
}

fn default_gain() -> f64 {
    1.0
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbisonicConventionConfig {
    #[default]
    Sqrt2,
    N3d,
}

impl From<AmbisonicConventionConfig> for AmbisonicConvention {
    fn from(value: AmbisonicConventionConfig) -> Self {
        match value {
            AmbisonicConventionConfig::Sqrt2 => AmbisonicConvention::Sqrt2,
            AmbisonicConventionConfig::N3d => AmbisonicConvention::N3D,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrirDatabaseKindConfig {
    Kemar,
    Cipic,
}

impl From<HrirDatabaseKindConfig> for HrirDatabaseKind {
    fn from(value: HrirDatabaseKindConfig) -> Self {
        match value {
            HrirDatabaseKindConfig::Kemar => HrirDatabaseKind::Kemar,
            HrirDatabaseKindConfig::Cipic => HrirDatabaseKind::Cipic,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadRefConfig {
    #[default]
    FacingX,
    FacingY,
}

impl From<HeadRefConfig> for HeadRefOrientation {
    fn from(value: HeadRefConfig) -> Self {
        match value {
            HeadRefConfig::FacingX => HeadRefOrientation::FacingX,
            HeadRefConfig::FacingY => HeadRefOrientation::FacingY,
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SimError::InvalidConfig(e.to_string()))
    }

    pub fn build_room<S: Sample>(&self) -> Option<CuboidRoom<S>> {
        self.room.as_ref().map(|r| {
            CuboidRoom::rigid(
                Point::new(r.dimensions[0], r.dimensions[1], r.dimensions[2]),
                Point::new(r.origin[0], r.origin[1], r.origin[2]),
                S::from_f64(r.wall_gain),
            )
        })
    }

    pub fn build_sources(&self) -> Vec<Source> {
        self.sources.iter().map(|s| Source::new(Point::new(s.position[0], s.position[1], s.position[2]))).collect()
    }

    pub fn build_receivers<S: Sample>(&self) -> Result<Vec<Receiver<S>>> {
        self.receivers.iter().map(|r| self.build_receiver(r)).collect()
    }

    fn build_receiver<S: Sample>(&self, config: &ReceiverConfig) -> Result<Receiver<S>> {
        let position = Point::new(config.position[0], config.position[1], config.position[2]);
        let orientation = match config.orientation_axis {
            Some(axis) => Quaternion::from_axis_angle(
                Point::new(axis[0], axis[1], axis[2]),
                config.orientation_angle_deg.to_radians(),
            ),
            None => Quaternion::identity(),
        };
        let directivity = self.build_directivity::<S>(&config.directivity)?;
        Ok(Receiver::new(directivity, position, orientation, config.max_num_incoming_waves))
    }

    fn build_directivity<S: Sample>(&self, config: &DirectivityConfig) -> Result<Directivity<S>> {
        match config {
            DirectivityConfig::Omni { gain } => Ok(Directivity::omni(S::from_f64(*gain))),
            DirectivityConfig::Trig { coefficients } => {
                Ok(Directivity::trig(coefficients.iter().map(|&c| S::from_f64(c)).collect()))
            }
            DirectivityConfig::Tan { base_angle_deg } => Ok(Directivity::tan(base_angle_deg.to_radians())),
            DirectivityConfig::Ambisonic { max_degree, convention } => {
                Ok(Directivity::ambisonic(*max_degree, (*convention).into()))
            }
            DirectivityConfig::DatabaseBinaural { kind, directory, hrir_length, head_reference, update_length_samples } => {
                let handle: HrirDatabaseHandle<S> =
                    HrirDatabaseHandle::load((*kind).into(), directory, self.sampling_frequency, *hrir_length)?;
                Ok(Directivity::database_binaural(handle, (*head_reference).into(), *update_length_samples))
            }
        }
    }
}
