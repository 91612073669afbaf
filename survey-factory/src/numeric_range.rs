//! Numeric and slider answer formats.

use survey_factory_types::{
    AnswerFormat, ContinuousScaleAnswerFormat, FormSubtype, NumericAnswerFormat, NumericStyle,
    ScaleAnswerFormat, SurveyItem,
};

/// A discrete scale with more positions than this is shown as a slider.
pub const MAX_DISCRETE_STEPS: f64 = 13.0;

const MAX_FRACTION_DIGITS: u32 = 10;

/// The `min`, `max`, `unit` and `stepInterval` keys of an item.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub unit: Option<String>,
    pub step_interval: f64,
}

impl NumberRange {
    pub fn new(min: Option<f64>, max: Option<f64>, step_interval: f64) -> Self {
        Self {
            min,
            max,
            unit: None,
            step_interval,
        }
    }

    pub fn from_item(item: &SurveyItem) -> Self {
        Self {
            min: item.min_number(),
            max: item.max_number(),
            unit: item.unit().map(str::to_string),
            step_interval: item.step_interval(),
        }
    }

    /// Neither end is given.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Both ends, when `min < max`.
    fn valid_bounds(&self) -> Option<(f64, f64)> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if max > min => Some((min, max)),
            _ => None,
        }
    }

    /// Build the format for a numeric subtype.
    ///
    /// A `scale` becomes a discrete scale only when the step evenly divides
    /// the range into at most [`MAX_DISCRETE_STEPS`] whole-number positions;
    /// otherwise it is a continuous slider. A `continuousScale` is always a
    /// slider. Without a valid range both fall back to a bounded numeric field.
    pub fn answer_format(&self, subtype: FormSubtype) -> AnswerFormat {
        let is_scale = matches!(subtype, FormSubtype::Scale | FormSubtype::ContinuousScale);
        let scale_bounds = self
            .valid_bounds()
            .filter(|_| is_scale && self.step_interval >= 0.0);
        if let Some((min, max)) = scale_bounds {
            let step = self.step_interval;
            if subtype == FormSubtype::ContinuousScale {
                return AnswerFormat::ContinuousScale(ContinuousScaleAnswerFormat::new(
                    max,
                    min,
                    fraction_digits(step),
                ));
            }

            let number_of_steps = ((max - min) / step).floor();
            let whole = min.fract() == 0.0 && max.fract() == 0.0 && step.fract() == 0.0;
            if number_of_steps > MAX_DISCRETE_STEPS
                || number_of_steps * step != max - min
                || !whole
            {
                return AnswerFormat::ContinuousScale(ContinuousScaleAnswerFormat::new(
                    max, min, 0,
                ));
            }
            return AnswerFormat::Scale(ScaleAnswerFormat::new(
                max as i64,
                min as i64,
                step as i64,
            ));
        }

        let style = match subtype {
            FormSubtype::Decimal | FormSubtype::ContinuousScale => NumericStyle::Decimal,
            _ => NumericStyle::Integer,
        };
        AnswerFormat::Numeric(NumericAnswerFormat::with_bounds(
            style,
            self.unit.clone(),
            self.min,
            self.max,
        ))
    }
}

/// Digits after the decimal point implied by a step interval.
pub fn fraction_digits(step: f64) -> u32 {
    let mut digits = 0;
    let mut pow = 1.0;
    while step > 0.0 && step < pow && digits < MAX_FRACTION_DIGITS {
        pow /= 10.0;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn whole_step_scale_is_discrete() {
        let format = NumberRange::new(Some(0.0), Some(10.0), 1.0).answer_format(FormSubtype::Scale);
        match format {
            AnswerFormat::Scale(scale) => {
                assert_eq!(scale.number_of_steps(), 10);
                assert_eq!(scale.step, 1);
            }
            other => panic!("expected a discrete scale, got {other:?}"),
        }
    }

    #[test]
    fn fine_step_scale_is_continuous() {
        let format = NumberRange::new(Some(0.0), Some(10.0), 0.1).answer_format(FormSubtype::Scale);
        assert!(matches!(format, AnswerFormat::ContinuousScale(_)));
    }

    #[test]
    fn uneven_step_scale_is_continuous() {
        let format = NumberRange::new(Some(0.0), Some(10.0), 3.0).answer_format(FormSubtype::Scale);
        assert!(matches!(format, AnswerFormat::ContinuousScale(_)));
    }

    #[test]
    fn continuous_scale_counts_fraction_digits() {
        let format = NumberRange::new(Some(0.0), Some(1.0), 0.01)
            .answer_format(FormSubtype::ContinuousScale);
        match format {
            AnswerFormat::ContinuousScale(scale) => assert_eq!(scale.maximum_fraction_digits, 2),
            other => panic!("expected a slider, got {other:?}"),
        }
    }

    #[test]
    fn inverted_range_falls_back_to_numeric() {
        let format = NumberRange::new(Some(10.0), Some(0.0), 1.0).answer_format(FormSubtype::Scale);
        assert_eq!(
            format,
            AnswerFormat::Numeric(NumericAnswerFormat::with_bounds(
                NumericStyle::Integer,
                None,
                Some(10.0),
                Some(0.0)
            ))
        );
    }

    #[test]
    fn decimal_keeps_unit() {
        let mut range = NumberRange::new(Some(0.0), None, 1.0);
        range.unit = Some("kg".to_string());
        match range.answer_format(FormSubtype::Decimal) {
            AnswerFormat::Numeric(numeric) => {
                assert_eq!(numeric.style, NumericStyle::Decimal);
                assert_eq!(numeric.unit.as_deref(), Some("kg"));
                assert_eq!(numeric.maximum, None);
            }
            other => panic!("expected a numeric field, got {other:?}"),
        }
    }

    #[test]
    fn fraction_digits_table() {
        assert_eq!(fraction_digits(1.0), 0);
        assert_eq!(fraction_digits(5.0), 0);
        assert_eq!(fraction_digits(0.5), 1);
        assert_eq!(fraction_digits(0.1), 1);
        assert_eq!(fraction_digits(0.001), 3);
        assert_eq!(fraction_digits(0.0), 0);
    }

    proptest! {
        #[test]
        fn scale_selection(min in -50i64..50, span in 1i64..200, step in 1i64..20) {
            let max = min + span;
            let format = NumberRange::new(Some(min as f64), Some(max as f64), step as f64)
                .answer_format(FormSubtype::Scale);
            let discrete = span % step == 0 && span / step <= 13;
            match format {
                AnswerFormat::Scale(scale) => {
                    prop_assert!(discrete);
                    prop_assert_eq!(scale.number_of_steps(), span / step);
                }
                AnswerFormat::ContinuousScale(_) => prop_assert!(!discrete),
                other => prop_assert!(false, "unexpected format {:?}", other),
            }
        }
    }
}
