//! Engine configuration: a flat record of recognized options.
//!
//! Defaults are named constants so the presets (`conservative`,
//! `aggressive`) are construction helpers rather than subtypes. A TOML
//! surface mirrors the struct for host applications that ship a config
//! file; every section and field may be omitted.

use serde::Deserialize;

use crate::keyboard::Layout;

pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;
pub const DEFAULT_PREFIX_LENGTH: usize = 7;
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.75;
pub const DEFAULT_DISTANCE_PENALTY_PER_EDIT: f64 = 0.2;
pub const DEFAULT_AMBIGUITY_MULT: f64 = 0.6;
pub const DEFAULT_SHORT_WORD_THRESHOLD: usize = 4;
pub const DEFAULT_SHORT_WORD_PENALTY_PER_CHAR: f64 = 0.07;
pub const DEFAULT_HIGH_FREQ_BONUS: f64 = 0.05;
pub const DEFAULT_HIGH_FREQ_THRESHOLD: u64 = 100_000;
pub const DEFAULT_VALID_WORD_MAX_CONFIDENCE: f64 = 0.6;
pub const DEFAULT_VALID_WORD_MIN_FREQ_RATIO: f64 = 10.0;

pub const DEFAULT_BEAM_WIDTH: usize = 10;
pub const DEFAULT_MAX_SEGMENT_LEN: usize = 20;
pub const DEFAULT_SEGMENT_EDIT_PENALTY: f64 = 5.0;

/// Preset thresholds: `conservative` only corrects near-certain typos,
/// `aggressive` trusts frequency and context more.
pub const CONSERVATIVE_MIN_CONFIDENCE: f64 = 0.85;
pub const AGGRESSIVE_MIN_CONFIDENCE: f64 = 0.6;

/// How the scorer orders surviving suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// Edit distance is strictly primary; frequency and bigram context
    /// only break ties inside a distance tier.
    #[default]
    DistanceFirst,
    /// Distance, frequency and bigram context blended (0.5/0.3/0.2).
    Balanced,
    /// Frequency and context outweigh distance (0.3/0.4/0.3).
    FrequencyBoosted,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpellConfig {
    pub engine: EngineSettings,
    pub ranking: RankingSettings,
    pub autocorrect: AutocorrectSettings,
    pub segmenter: SegmenterSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// Maximum edit distance the delete index is built for and lookups
    /// may request.
    pub max_edit_distance: usize,
    /// Leading characters of a term that participate in delete
    /// generation. Must exceed both 1 and `max_edit_distance`.
    pub prefix_length: usize,
    /// Capacity of the per-store term count cache (0 disables it).
    pub cache_capacity: usize,
    /// Keyboard layout whose matrix weighs substitution costs, when its
    /// file is present in the data directory.
    pub keyboard_layout: Option<Layout>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            prefix_length: DEFAULT_PREFIX_LENGTH,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            keyboard_layout: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankingSettings {
    pub mode: RankingMode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutocorrectSettings {
    pub min_confidence: f64,
    pub distance_penalty_per_edit: f64,
    pub ambiguity_mult: f64,
    pub short_word_threshold: usize,
    pub short_word_penalty_per_char: f64,
    pub high_freq_bonus: f64,
    pub high_freq_threshold: u64,
    pub valid_word_max_confidence: f64,
    pub valid_word_min_freq_ratio: f64,
}

impl Default for AutocorrectSettings {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            distance_penalty_per_edit: DEFAULT_DISTANCE_PENALTY_PER_EDIT,
            ambiguity_mult: DEFAULT_AMBIGUITY_MULT,
            short_word_threshold: DEFAULT_SHORT_WORD_THRESHOLD,
            short_word_penalty_per_char: DEFAULT_SHORT_WORD_PENALTY_PER_CHAR,
            high_freq_bonus: DEFAULT_HIGH_FREQ_BONUS,
            high_freq_threshold: DEFAULT_HIGH_FREQ_THRESHOLD,
            valid_word_max_confidence: DEFAULT_VALID_WORD_MAX_CONFIDENCE,
            valid_word_min_freq_ratio: DEFAULT_VALID_WORD_MIN_FREQ_RATIO,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmenterSettings {
    pub beam_width: usize,
    pub max_segment_len: usize,
    /// Score penalty per accumulated edit; the aggressive default keeps
    /// single-letter splittings out of the beam.
    pub edit_penalty: f64,
}

impl Default for SegmenterSettings {
    fn default() -> Self {
        Self {
            beam_width: DEFAULT_BEAM_WIDTH,
            max_segment_len: DEFAULT_MAX_SEGMENT_LEN,
            edit_penalty: DEFAULT_SEGMENT_EDIT_PENALTY,
        }
    }
}

impl SpellConfig {
    /// Default geometry with a high correction threshold.
    pub fn conservative() -> Self {
        let mut config = Self::default();
        config.autocorrect.min_confidence = CONSERVATIVE_MIN_CONFIDENCE;
        config.ranking.mode = RankingMode::DistanceFirst;
        config
    }

    /// Default geometry, frequency-boosted ranking and a low correction
    /// threshold.
    pub fn aggressive() -> Self {
        let mut config = Self::default();
        config.autocorrect.min_confidence = AGGRESSIVE_MIN_CONFIDENCE;
        config.ranking.mode = RankingMode::FrequencyBoosted;
        config
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: SpellConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        macro_rules! check_unit_interval {
            ($section:ident . $field:ident) => {
                if !(0.0..=1.0).contains(&self.$section.$field) {
                    return Err(ConfigError::InvalidValue {
                        field: concat!(stringify!($section), ".", stringify!($field)),
                        reason: "must be within [0, 1]",
                    });
                }
            };
        }
        macro_rules! check_non_negative {
            ($section:ident . $field:ident) => {
                if self.$section.$field < 0.0 {
                    return Err(ConfigError::InvalidValue {
                        field: concat!(stringify!($section), ".", stringify!($field)),
                        reason: "must be non-negative",
                    });
                }
            };
        }
        macro_rules! check_positive {
            ($section:ident . $field:ident) => {
                if self.$section.$field == 0 {
                    return Err(ConfigError::InvalidValue {
                        field: concat!(stringify!($section), ".", stringify!($field)),
                        reason: "must be positive",
                    });
                }
            };
        }

        if self.engine.prefix_length <= 1 {
            return Err(ConfigError::InvalidValue {
                field: "engine.prefix_length",
                reason: "must be greater than 1",
            });
        }
        if self.engine.prefix_length <= self.engine.max_edit_distance {
            return Err(ConfigError::InvalidValue {
                field: "engine.prefix_length",
                reason: "must exceed max_edit_distance",
            });
        }

        check_unit_interval!(autocorrect.min_confidence);
        check_unit_interval!(autocorrect.valid_word_max_confidence);
        check_non_negative!(autocorrect.distance_penalty_per_edit);
        check_non_negative!(autocorrect.ambiguity_mult);
        check_non_negative!(autocorrect.short_word_penalty_per_char);
        check_non_negative!(autocorrect.high_freq_bonus);
        check_non_negative!(autocorrect.valid_word_min_freq_ratio);
        check_positive!(autocorrect.short_word_threshold);

        check_positive!(segmenter.beam_width);
        check_positive!(segmenter.max_segment_len);
        check_non_negative!(segmenter.edit_penalty);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = SpellConfig::default();
        config.validate().unwrap();
        assert_eq!(config.engine.max_edit_distance, 2);
        assert_eq!(config.engine.prefix_length, 7);
        assert_eq!(config.engine.cache_capacity, 1000);
        assert_eq!(config.ranking.mode, RankingMode::DistanceFirst);
        assert!((config.autocorrect.min_confidence - 0.75).abs() < f64::EPSILON);
        assert_eq!(config.segmenter.beam_width, 10);
        assert_eq!(config.segmenter.max_segment_len, 20);
    }

    #[test]
    fn presets_only_move_policy_knobs() {
        let conservative = SpellConfig::conservative();
        let aggressive = SpellConfig::aggressive();
        // geometry stays compatible with files built under the defaults
        assert_eq!(conservative.engine.max_edit_distance, 2);
        assert_eq!(aggressive.engine.prefix_length, 7);
        assert!(conservative.autocorrect.min_confidence > aggressive.autocorrect.min_confidence);
        assert_eq!(aggressive.ranking.mode, RankingMode::FrequencyBoosted);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = SpellConfig::from_toml(
            r#"
[engine]
max_edit_distance = 1
keyboard_layout = "qwerty"

[ranking]
mode = "balanced"
"#,
        )
        .unwrap();
        assert_eq!(config.engine.max_edit_distance, 1);
        assert_eq!(config.engine.prefix_length, 7);
        assert_eq!(config.engine.keyboard_layout, Some(crate::keyboard::Layout::Qwerty));
        assert_eq!(config.ranking.mode, RankingMode::Balanced);
        assert!((config.autocorrect.ambiguity_mult - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn prefix_length_must_exceed_max_edit_distance() {
        let err = SpellConfig::from_toml(
            r#"
[engine]
max_edit_distance = 7
prefix_length = 7
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("engine.prefix_length"));
    }

    #[test]
    fn prefix_length_must_exceed_one() {
        let mut config = SpellConfig::default();
        config.engine.prefix_length = 1;
        config.engine.max_edit_distance = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn confidence_outside_unit_interval_rejected() {
        let mut config = SpellConfig::default();
        config.autocorrect.min_confidence = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("autocorrect.min_confidence"));
    }

    #[test]
    fn zero_beam_width_rejected() {
        let mut config = SpellConfig::default();
        config.segmenter.beam_width = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("segmenter.beam_width"));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = SpellConfig::from_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let err = SpellConfig::from_toml("[engine]\nmax_typo_distance = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
