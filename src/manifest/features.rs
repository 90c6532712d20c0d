//! Feature tokens and build-flag synthesis.
//!
//! Each recognized token enables zero or more `configure` flags or structural
//! edits. Flag order in the rendered `BUILD_FLAGS` string is fixed by
//! [`Feature::ALL`], independent of the order tokens arrive on the command
//! line.

use tracing::debug;

/// Flags every snap build passes to `configure`, before any feature flags.
pub const BASE_FLAGS: [&str; 3] = ["--snap", "--prefix=/usr", "--build=build-snap"];

/// A recognized feature token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// NVIDIA hardware encode/decode.
    Nvenc,
    /// AMD VCE hardware encode.
    Vce,
    /// Fraunhofer FDK AAC encoder.
    FdkAac,
    /// Intel Quick Sync Video.
    Qsv,
    /// Dolby Vision RPU handling; keeps the rust-toolchain part in the
    /// manifest instead of stripping it.
    Libdovi,
}

impl Feature {
    /// All features, in the order their flags are appended to `BUILD_FLAGS`.
    pub const ALL: [Self; 5] = [
        Self::Nvenc,
        Self::Vce,
        Self::FdkAac,
        Self::Qsv,
        Self::Libdovi,
    ];

    /// Parse a command-line token; `None` for unrecognized tokens.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "nvenc" => Some(Self::Nvenc),
            "vce" => Some(Self::Vce),
            "fdk-aac" => Some(Self::FdkAac),
            "qsv" => Some(Self::Qsv),
            "libdovi" => Some(Self::Libdovi),
            _ => None,
        }
    }

    /// The `configure` flags this feature contributes.
    ///
    /// `libdovi` contributes none; it gates the rust-toolchain strip instead.
    #[must_use]
    pub const fn configure_flags(self) -> &'static [&'static str] {
        match self {
            Self::Nvenc => &["--enable-nvenc", "--enable-nvdec"],
            Self::Vce => &["--enable-vce"],
            Self::FdkAac => &["--enable-fdk-aac"],
            Self::Qsv => &["--enable-qsv"],
            Self::Libdovi => &[],
        }
    }
}

/// The set of features requested for one run.
#[derive(Debug, Default, Clone)]
pub struct FeatureSet(Vec<Feature>);

impl FeatureSet {
    /// Build a set from raw command-line tokens.
    ///
    /// Unrecognized tokens are ignored (logged at debug level); duplicates
    /// collapse to a single entry.
    #[must_use]
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut enabled = Vec::new();
        for token in tokens {
            let token = token.as_ref();
            match Feature::from_token(token) {
                Some(feature) if !enabled.contains(&feature) => enabled.push(feature),
                Some(_) => {}
                None => debug!("ignoring unrecognized feature token '{token}'"),
            }
        }
        Self(enabled)
    }

    /// Whether `feature` was requested.
    #[must_use]
    pub fn contains(&self, feature: Feature) -> bool {
        self.0.contains(&feature)
    }

    /// Render the `BUILD_FLAGS` value: the base flags followed by each enabled
    /// feature's flags in [`Feature::ALL`] order, space-joined.
    #[must_use]
    pub fn build_flags(&self) -> String {
        let mut flags: Vec<&str> = BASE_FLAGS.to_vec();
        for feature in Feature::ALL {
            if self.contains(feature) {
                flags.extend_from_slice(feature.configure_flags());
            }
        }
        flags.join(" ")
    }
}
