//! Scoring policy: defect set to overall score and verdict.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use tracing::debug;

use super::classifier::DEFAULT_NON_DEFECT_HINTS;
use crate::domain::{Defect, Evaluation, RawPrediction, Severity, Verdict};
use crate::error::EngineError;

/// Configuration for the scoring policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Label substrings that count as a positive ("good") signal.
    pub positive_label_hints: Vec<String>,
    /// A positive top result must be strictly above this confidence.
    pub positive_confidence: f64,
    /// Verdict when there are no defects and no strong positive signal.
    pub ambiguous_verdict: Verdict,
    /// Score when there are no defects and no strong positive signal.
    pub ambiguous_score: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            positive_label_hints: DEFAULT_NON_DEFECT_HINTS
                .iter()
                .map(ToString::to_string)
                .collect(),
            positive_confidence: 0.60,
            ambiguous_verdict: Verdict::Pass,
            ambiguous_score: 85,
        }
    }
}

/// Derives an overall score and verdict from a defect set.
#[derive(Debug, Clone, Default)]
pub struct ScoringPolicy {
    config: ScoringConfig,
}

impl ScoringPolicy {
    /// Creates a policy with the given configuration.
    #[must_use]
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Evaluates a defect set.
    ///
    /// The first matching rule wins:
    /// 1. any high defect: fail, `max(20, 100 - 40*high - 20*medium)`
    /// 2. any medium defect: review, `max(50, 100 - 25*medium)`
    /// 3. only low defects: review, `max(70, 100 - 15*count)`
    /// 4. no defects: pass on a strong positive top result, else the
    ///    configured ambiguous verdict
    ///
    /// # Errors
    ///
    /// Returns `InsufficientEvidence` when there are no defects and no top
    /// result at all.
    pub fn evaluate(
        &self,
        defects: &[Defect],
        top: Option<&RawPrediction>,
    ) -> Result<Evaluation, EngineError> {
        let high = count(defects, Severity::High);
        let medium = count(defects, Severity::Medium);

        let evaluation = if high > 0 {
            Evaluation {
                overall_score: clamp_score((100 - 40 * high - 20 * medium).max(20)),
                verdict: Verdict::Fail,
            }
        } else if medium > 0 {
            Evaluation {
                overall_score: clamp_score((100 - 25 * medium).max(50)),
                verdict: Verdict::Review,
            }
        } else if !defects.is_empty() {
            let total = i64::try_from(defects.len()).unwrap_or(i64::MAX / 16);
            Evaluation {
                overall_score: clamp_score((100 - 15 * total).max(70)),
                verdict: Verdict::Review,
            }
        } else {
            let top = top.ok_or(EngineError::InsufficientEvidence)?;
            self.evaluate_clean(top)
        };

        debug!(
            "Evaluated {} defects ({high} high, {medium} medium): {} @ {}",
            defects.len(),
            evaluation.verdict,
            evaluation.overall_score
        );
        Ok(evaluation)
    }

    /// Rule 4: no defects were extracted.
    fn evaluate_clean(&self, top: &RawPrediction) -> Evaluation {
        let confidence = top.sanitized_confidence();
        if top.matches_any(&self.config.positive_label_hints)
            && confidence > self.config.positive_confidence
        {
            let score = (70.0 + confidence * 100.0 / 3.0).min(95.0).round();
            Evaluation {
                overall_score: clamp_score(score as i64),
                verdict: Verdict::Pass,
            }
        } else {
            Evaluation {
                overall_score: self.config.ambiguous_score.min(100),
                verdict: self.config.ambiguous_verdict,
            }
        }
    }
}

fn count(defects: &[Defect], severity: Severity) -> i64 {
    let n = defects.iter().filter(|d| d.severity == severity).count();
    i64::try_from(n).unwrap_or(i64::MAX / 64)
}

fn clamp_score(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::DefectCategory;

    fn defect(severity: Severity) -> Defect {
        Defect {
            defect_type: "scratch".into(),
            category: DefectCategory::Scratch,
            severity,
            confidence: 50,
        }
    }

    fn defects(high: usize, medium: usize, low: usize) -> Vec<Defect> {
        std::iter::repeat_with(|| defect(Severity::High))
            .take(high)
            .chain(std::iter::repeat_with(|| defect(Severity::Medium)).take(medium))
            .chain(std::iter::repeat_with(|| defect(Severity::Low)).take(low))
            .collect()
    }

    fn evaluate(defects: &[Defect], top: Option<RawPrediction>) -> Evaluation {
        ScoringPolicy::default()
            .evaluate(defects, top.as_ref())
            .unwrap()
    }

    // === Rule 1: High Severity ===

    #[test]
    fn test_single_high_fails_at_60() {
        let e = evaluate(&defects(1, 0, 0), Some(RawPrediction::new("Crack", 0.85)));
        assert_eq!(e.verdict, Verdict::Fail);
        assert_eq!(e.overall_score, 60);
    }

    #[test]
    fn test_high_with_medium_penalty() {
        let e = evaluate(&defects(1, 1, 3), None);
        assert_eq!(e.verdict, Verdict::Fail);
        assert_eq!(e.overall_score, 40);
    }

    #[test]
    fn test_high_floor_is_20() {
        let e = evaluate(&defects(3, 2, 0), None);
        assert_eq!(e.overall_score, 20);
    }

    // === Rule 2: Medium Severity ===

    #[test]
    fn test_medium_reviews() {
        let e = evaluate(&defects(0, 1, 1), None);
        assert_eq!(e.verdict, Verdict::Review);
        assert_eq!(e.overall_score, 75);
    }

    #[test]
    fn test_medium_floor_is_50() {
        let e = evaluate(&defects(0, 5, 0), None);
        assert_eq!(e.overall_score, 50);
    }

    // === Rule 3: Low Only ===

    #[test]
    fn test_low_only_reviews() {
        let e = evaluate(&defects(0, 0, 1), None);
        assert_eq!(e.verdict, Verdict::Review);
        assert_eq!(e.overall_score, 85);
    }

    #[test]
    fn test_low_floor_is_70() {
        let e = evaluate(&defects(0, 0, 4), None);
        assert_eq!(e.overall_score, 70);
    }

    // === Rule 4: No Defects ===

    #[test]
    fn test_strong_positive_passes_capped_at_95() {
        let e = evaluate(&[], Some(RawPrediction::new("Good Pill", 0.90)));
        assert_eq!(e.verdict, Verdict::Pass);
        assert_eq!(e.overall_score, 95);
    }

    #[test]
    fn test_positive_score_formula() {
        // 70 + 65/3 = 91.67
        let e = evaluate(&[], Some(RawPrediction::new("normal", 0.65)));
        assert_eq!(e.verdict, Verdict::Pass);
        assert_eq!(e.overall_score, 92);
    }

    #[test]
    fn test_weak_positive_is_ambiguous() {
        let e = evaluate(&[], Some(RawPrediction::new("good", 0.60)));
        assert_eq!(e.verdict, Verdict::Pass);
        assert_eq!(e.overall_score, 85);
    }

    #[test]
    fn test_unrecognized_top_is_ambiguous() {
        // A low-confidence defect label that was dropped by the classifier
        let e = evaluate(&[], Some(RawPrediction::new("crack", 0.2)));
        assert_eq!(e.verdict, Verdict::Pass);
        assert_eq!(e.overall_score, 85);
    }

    #[test]
    fn test_ambiguous_verdict_configurable() {
        let policy = ScoringPolicy::new(ScoringConfig {
            ambiguous_verdict: Verdict::Review,
            ambiguous_score: 70,
            ..ScoringConfig::default()
        });
        let e = policy
            .evaluate(&[], Some(&RawPrediction::new("unknown", 0.5)))
            .unwrap();
        assert_eq!(e.verdict, Verdict::Review);
        assert_eq!(e.overall_score, 70);
    }

    #[test]
    fn test_no_signal_is_insufficient_evidence() {
        let result = ScoringPolicy::default().evaluate(&[], None);
        assert_eq!(result, Err(EngineError::InsufficientEvidence));
    }

    #[test]
    fn test_defects_without_top_still_scored() {
        assert!(ScoringPolicy::default()
            .evaluate(&defects(0, 0, 1), None)
            .is_ok());
    }
}
