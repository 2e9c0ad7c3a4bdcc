//! Landing Risk Index scoring.
//!
//! Blends the weather (W), navigation-integrity (N) and terrain (T)
//! sub-scores with a weighted harmonic combination, so a single badly
//! degraded dimension dominates the result. Hard-stop rules override the
//! grade independently of the LRI value.

use thiserror::Error;

use crate::models::{Grade, HardStopReason, MeasurementRecord, ScoreResult};
use crate::rules::ScoringRules;

/// Lower bound for W and N inside the harmonic term.
///
/// Keeps a zero or negative sub-score from dividing by zero; LRI then
/// collapses toward 0 instead.
pub const SUBSCORE_FLOOR: f64 = 1e-6;

#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("non-finite value in {field}")]
    NonFinite { field: &'static str },
}

/// Score a record with the default rules.
pub fn score(record: &MeasurementRecord) -> Result<ScoreResult, ScoreError> {
    score_with_rules(record, &ScoringRules::default())
}

/// Score a record using configured rules.
pub fn score_with_rules(
    record: &MeasurementRecord,
    rules: &ScoringRules,
) -> Result<ScoreResult, ScoreError> {
    for (field, value) in record.fields() {
        if !value.is_finite() {
            return Err(ScoreError::NonFinite { field });
        }
    }
    // f64::min would swallow a NaN ratio, so check before clamping.
    check_finite(
        "visibility ratio",
        record.actual_visibility / record.required_visibility,
    )?;

    let w = weather_score(record);
    let n = navigation_score(record, rules);
    let t = terrain_score(record, rules);

    let t_norm = if rules.weight_terrain != 0.0 {
        t / rules.weight_terrain
    } else {
        0.0
    };
    let t_safe = t_norm.max(rules.terrain_floor);

    let denominator = rules.weight_weather / w.max(SUBSCORE_FLOOR)
        + rules.weight_navigation / n.max(SUBSCORE_FLOOR)
        + rules.weight_terrain / t_safe;
    let lri = round2((100.0 / denominator).min(100.0));

    check_finite("W", w)?;
    check_finite("N", n)?;
    check_finite("T", t)?;
    check_finite("LRI", lri)?;

    let hard_stop_reasons = hard_stop_reasons(record, rules);
    let hard_stop = !hard_stop_reasons.is_empty();

    Ok(ScoreResult {
        lri,
        grade: grade_for(lri, hard_stop, rules),
        w_score: round2(w),
        n_score: round2(n),
        t_score: round2(t),
        hard_stop,
        hard_stop_reasons,
    })
}

/// `W = 100 * min(1, p / p_req) * (1 - alpha_cloud)`
pub fn weather_score(record: &MeasurementRecord) -> f64 {
    let ratio = record.actual_visibility / record.required_visibility;
    100.0 * ratio.min(1.0) * (1.0 - record.alpha_cloud)
}

/// 50 points per alert limit, linear in the excess over 20 m. No penalty
/// while within limits.
pub fn navigation_score(record: &MeasurementRecord, rules: &ScoringRules) -> f64 {
    let horizontal = ((record.hpl - rules.alert_limit_horizontal_m) / 20.0).max(0.0);
    let vertical = ((record.vpl - rules.alert_limit_vertical_m) / 20.0).max(0.0);
    100.0 - (50.0 * horizontal + 50.0 * vertical)
}

/// Raw terrain score. The terrain weight is folded in here and divided
/// back out before combining.
pub fn terrain_score(record: &MeasurementRecord, rules: &ScoringRules) -> f64 {
    100.0 * rules.weight_terrain * (1.0 - record.alpha_terrain) - 40.0 * record.r_och_neg
}

pub fn hard_stop_reasons(record: &MeasurementRecord, rules: &ScoringRules) -> Vec<HardStopReason> {
    let mut reasons = Vec::new();
    if record.ctbt < rules.ctbt_hard_stop {
        reasons.push(HardStopReason::Ctbt);
    }
    // Both axes must exceed; a single-axis excess only costs N points.
    if record.hpl > rules.alert_limit_horizontal_m && record.vpl > rules.alert_limit_vertical_m {
        reasons.push(HardStopReason::ProtectionLevels);
    }
    if record.delta_sigma_0 > rules.delta_sigma_hard_stop
        && record.core_percent >= rules.core_percent_hard_stop
    {
        reasons.push(HardStopReason::CoreAnomaly);
    }
    reasons
}

/// Grade from `(lri, hard_stop)`; first match wins.
pub fn grade_for(lri: f64, hard_stop: bool, rules: &ScoringRules) -> Grade {
    if hard_stop {
        Grade::Red
    } else if lri < rules.tau_red {
        Grade::Yellow
    } else if lri < rules.tau_yellow {
        Grade::Blue
    } else {
        Grade::Green
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ScoreError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ScoreError::NonFinite { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::Scenario;

    fn benign() -> MeasurementRecord {
        MeasurementRecord {
            actual_visibility: 60.0,
            required_visibility: 30.0,
            alpha_cloud: 0.0,
            hpl: 40.0,
            vpl: 50.0,
            alpha_terrain: 0.01,
            r_och_neg: 0.0,
            ctbt: 273.0,
            delta_sigma_0: 0.0,
            core_percent: 0.0,
        }
    }

    #[test]
    fn very_good_record_caps_at_100() {
        let result = score(&benign()).unwrap();
        assert_eq!(result.w_score, 100.0);
        assert_eq!(result.n_score, 100.0);
        assert_eq!(result.t_score, 19.8);
        // 100 / (0.0045 + 0.0035 + 0.2/99) is far above the cap
        assert_eq!(result.lri, 100.0);
        assert!(!result.hard_stop);
        assert_eq!(result.grade, Grade::Green);
    }

    #[test]
    fn low_ctbt_forces_hard_stop() {
        let record = MeasurementRecord {
            ctbt: 230.0,
            ..benign()
        };
        let result = score(&record).unwrap();
        assert_eq!(result.lri, 100.0);
        assert!(result.hard_stop);
        assert_eq!(result.hard_stop_reasons, vec![HardStopReason::Ctbt]);
        assert_eq!(result.grade, Grade::Red);
    }

    #[test]
    fn single_axis_excess_is_not_a_hard_stop() {
        let record = MeasurementRecord {
            hpl: 55.0,
            ..benign()
        };
        let result = score(&record).unwrap();
        assert!(!result.hard_stop);
        assert_eq!(result.n_score, 62.5);

        let record = MeasurementRecord {
            vpl: 65.0,
            ..benign()
        };
        assert!(!score(&record).unwrap().hard_stop);
    }

    #[test]
    fn both_axes_over_limit_is_a_hard_stop() {
        let record = MeasurementRecord {
            hpl: 40.5,
            vpl: 50.5,
            ..benign()
        };
        let result = score(&record).unwrap();
        assert!(result.hard_stop);
        assert_eq!(result.hard_stop_reasons, vec![HardStopReason::ProtectionLevels]);
    }

    #[test]
    fn core_anomaly_needs_both_conditions() {
        let record = MeasurementRecord {
            delta_sigma_0: 3.5,
            core_percent: 29.0,
            ..benign()
        };
        assert!(!score(&record).unwrap().hard_stop);

        let record = MeasurementRecord {
            delta_sigma_0: 3.0,
            core_percent: 40.0,
            ..benign()
        };
        assert!(!score(&record).unwrap().hard_stop);

        let record = MeasurementRecord {
            delta_sigma_0: 3.01,
            core_percent: 30.0,
            ..benign()
        };
        let result = score(&record).unwrap();
        assert_eq!(result.hard_stop_reasons, vec![HardStopReason::CoreAnomaly]);
    }

    #[test]
    fn warning_scenario_lands_in_warning_tier() {
        let result = score(&Scenario::Warning.record()).unwrap();
        assert_eq!(result.w_score, 0.36);
        assert_eq!(result.n_score, 5.0);
        assert!((result.lri - 75.64).abs() < 1e-9);
        assert_eq!(result.grade, Grade::Blue);
    }

    #[test]
    fn severe_scenario_lands_in_severe_tier() {
        let result = score(&Scenario::Severe.record()).unwrap();
        assert!(!result.hard_stop);
        assert_eq!(result.t_score, -2.0);
        assert!(result.lri < 1.0);
        assert_eq!(result.grade, Grade::Yellow);
    }

    #[test]
    fn grade_boundaries_are_half_open() {
        let rules = ScoringRules::default();
        assert_eq!(grade_for(59.99, false, &rules), Grade::Yellow);
        assert_eq!(grade_for(60.0, false, &rules), Grade::Blue);
        assert_eq!(grade_for(79.99, false, &rules), Grade::Blue);
        assert_eq!(grade_for(80.0, false, &rules), Grade::Green);
        assert_eq!(grade_for(100.0, true, &rules), Grade::Red);
        assert_eq!(grade_for(0.0, true, &rules), Grade::Red);
    }

    #[test]
    fn zero_visibility_collapses_lri_without_error() {
        let record = MeasurementRecord {
            actual_visibility: 0.0,
            ..benign()
        };
        let result = score(&record).unwrap();
        assert_eq!(result.w_score, 0.0);
        assert!(result.lri >= 0.0 && result.lri < 0.01);
        assert_eq!(result.grade, Grade::Yellow);
    }

    #[test]
    fn negative_navigation_score_stays_in_range() {
        let record = MeasurementRecord {
            hpl: 200.0,
            ..benign()
        };
        let result = score(&record).unwrap();
        assert!(result.n_score < 0.0);
        assert!((0.0..=100.0).contains(&result.lri));
    }

    #[test]
    fn terrain_floor_bounds_the_harmonic_term() {
        let record = MeasurementRecord {
            alpha_terrain: 1.0,
            r_och_neg: 1.0,
            ..benign()
        };
        let result = score(&record).unwrap();
        assert_eq!(result.t_score, -40.0);
        // 100 / (0.0045 + 0.0035 + 0.2/5) stays capped
        assert_eq!(result.lri, 100.0);
    }

    #[test]
    fn zero_over_zero_visibility_is_a_computation_error() {
        let record = MeasurementRecord {
            actual_visibility: 0.0,
            required_visibility: 0.0,
            ..benign()
        };
        assert_eq!(
            score(&record),
            Err(ScoreError::NonFinite {
                field: "visibility ratio"
            })
        );

        let record = MeasurementRecord {
            required_visibility: 0.0,
            ..benign()
        };
        assert!(score(&record).is_err());
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let record = MeasurementRecord {
            hpl: f64::NAN,
            ..benign()
        };
        assert_eq!(score(&record), Err(ScoreError::NonFinite { field: "HPL" }));
    }

    #[test]
    fn scorer_leaves_record_untouched() {
        let record = benign();
        let copy = record.clone();
        let _ = score(&record).unwrap();
        assert_eq!(record, copy);
    }

    #[test]
    fn lri_stays_in_range_across_a_sweep() {
        for vis in [0.0, 0.01, 1.0, 10.0, 30.0, 90.0] {
            for hpl in [0.0, 40.0, 60.0, 120.0] {
                for alpha in [0.0, 0.5, 0.99, 1.0] {
                    let record = MeasurementRecord {
                        actual_visibility: vis,
                        alpha_cloud: alpha,
                        hpl,
                        ..benign()
                    };
                    let result = score(&record).unwrap();
                    assert!((0.0..=100.0).contains(&result.lri), "{:?}", record);
                }
            }
        }
    }
}
