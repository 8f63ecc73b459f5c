//! BMI 计算与分类
//!
//! 输入为表单中的两个字符串（身高 cm、体重 kg）；任一为空则不计算。
//! 解析失败得到 NaN，照常参与计算，不报错。分类基于未取整的原始值。

use std::fmt;

/// 分类阈值（半开区间的左端点）
const UNDERWEIGHT_BELOW: f64 = 18.5;
const OVERWEIGHT_FROM: f64 = 25.0;
const OBESE_FROM: f64 = 30.0;

/// BMI 分类
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Underweight,
    NormalWeight,
    Overweight,
    Obese,
}

impl Category {
    /// 按阈值分类；比较链上 NaN 不满足任何条件，落入 Obese
    pub fn classify(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_BELOW {
            Category::Underweight
        } else if bmi >= UNDERWEIGHT_BELOW && bmi < OVERWEIGHT_FROM {
            Category::NormalWeight
        } else if bmi >= OVERWEIGHT_FROM && bmi < OBESE_FROM {
            Category::Overweight
        } else {
            Category::Obese
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Underweight => "Underweight",
            Category::NormalWeight => "Normal weight",
            Category::Overweight => "Overweight",
            Category::Obese => "Obese",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 分类参考表的一行（静态，只读）
#[derive(Clone, Copy, Debug)]
pub struct CategoryRow {
    pub category: Category,
    pub range: &'static str,
}

/// 「BMI Categories」面板展示的四行
pub const CATEGORY_TABLE: [CategoryRow; 4] = [
    CategoryRow {
        category: Category::Underweight,
        range: "Less than 18.5",
    },
    CategoryRow {
        category: Category::NormalWeight,
        range: "18.5 - 24.9",
    },
    CategoryRow {
        category: Category::Overweight,
        range: "25 - 29.9",
    },
    CategoryRow {
        category: Category::Obese,
        range: "30 or greater",
    },
];

/// 一次计算结果：取整后的 BMI 与其分类同生共灭
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BmiReading {
    pub value: f64,
    pub category: Category,
}

impl BmiReading {
    /// 展示用文本，如 `23.1`
    pub fn display_value(&self) -> String {
        format_bmi(self.value)
    }
}

/// 由身高（cm）与体重（kg）字符串计算 BMI；任一为空返回 None
pub fn compute(height: &str, weight: &str) -> Option<BmiReading> {
    if height.is_empty() || weight.is_empty() {
        return None;
    }

    let height_m = parse_number(height) / 100.0;
    let weight_kg = parse_number(weight);
    let raw = weight_kg / (height_m * height_m);

    Some(BmiReading {
        value: round_one_decimal(raw),
        category: Category::classify(raw),
    })
}

/// 宽松解析：失败时返回 NaN
fn parse_number(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// 按十进制精确值保留一位小数；恰好落在 .x5 上时远离零取整
///
/// `v * 10.0` 有乘法误差（18.4499… × 10 == 184.5），所以按精确十进制值格式化。
/// 二进制能精确表示的 .x5 只有 .25 / .75（v * 4 为奇数），此时乘 10 无误差，可直接 round。
fn round_one_decimal(v: f64) -> f64 {
    if !v.is_finite() {
        return v;
    }
    let quarters = v * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return (v * 10.0).round() / 10.0;
    }
    format!("{:.1}", v).parse().unwrap_or(v)
}

/// 超过此值时按指数形式显示
const EXPONENT_FROM: f64 = 1e21;

/// 与网页表单一致的数值显示：`25` 而不是 `25.0`，`-0` 显示为 `0`，
/// 无穷显示为 `Infinity`，极大值显示为 `1e+21`
pub fn format_bmi(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if v == 0.0 {
        "0".to_string()
    } else if v.abs() >= EXPONENT_FROM {
        format!("{:e}", v).replacen('e', "e+", 1)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(h: &str, w: &str) -> BmiReading {
        compute(h, w).expect("both fields filled")
    }

    #[test]
    fn test_compute_normal_weight() {
        let r = reading("180", "75");
        assert_eq!(r.value, 23.1);
        assert_eq!(r.category, Category::NormalWeight);
        assert_eq!(r.category.label(), "Normal weight");
    }

    #[test]
    fn test_compute_underweight() {
        let r = reading("160", "45");
        assert_eq!(r.value, 17.6);
        assert_eq!(r.category, Category::Underweight);
    }

    #[test]
    fn test_compute_overweight() {
        let r = reading("170", "85");
        assert_eq!(r.value, 29.4);
        assert_eq!(r.category, Category::Overweight);
    }

    #[test]
    fn test_compute_obese() {
        let r = reading("165", "100");
        assert_eq!(r.value, 36.7);
        assert_eq!(r.category, Category::Obese);
    }

    #[test]
    fn test_empty_field_skips_computation() {
        assert!(compute("", "70").is_none());
        assert!(compute("170", "").is_none());
        assert!(compute("", "").is_none());
    }

    #[test]
    fn test_non_numeric_yields_nan() {
        let r = reading("abc", "70");
        assert!(r.value.is_nan());
        assert_eq!(r.category, Category::Obese);
        assert_eq!(r.display_value(), "NaN");
    }

    #[test]
    fn test_zero_height_is_infinite() {
        let r = reading("0", "70");
        assert!(r.value.is_infinite());
        assert_eq!(r.category, Category::Obese);
        assert_eq!(r.display_value(), "Infinity");
    }

    #[test]
    fn test_category_uses_unrounded_value() {
        // 24.96 显示为 25，但仍属于 Normal weight
        assert_eq!(Category::classify(24.96), Category::NormalWeight);
        assert_eq!(round_one_decimal(24.96), 25.0);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(Category::classify(18.4999), Category::Underweight);
        assert_eq!(Category::classify(18.5), Category::NormalWeight);
        assert_eq!(Category::classify(25.0), Category::Overweight);
        assert_eq!(Category::classify(30.0), Category::Obese);
        assert_eq!(Category::classify(-3.0), Category::Underweight);
    }

    #[test]
    fn test_rounding_uses_decimal_value() {
        // 原始值 18.4499…，不能被进位成 18.5
        let r = reading("200", "73.8");
        assert_eq!(r.value, 18.4);
        assert_eq!(r.category, Category::Underweight);
        assert_eq!(r.display_value(), "18.4");

        assert_eq!(reading("200", "75.8").value, 18.9);
    }

    #[test]
    fn test_rounding_near_thresholds() {
        assert_eq!(round_one_decimal(18.45 - 1e-9), 18.4);
        assert_eq!(round_one_decimal(24.95 - 1e-9), 24.9);
        assert_eq!(round_one_decimal(29.95 - 1e-9), 29.9);
        assert_eq!(round_one_decimal(29.95 + 1e-9), 30.0);
        assert_eq!(Category::classify(29.95 + 1e-9), Category::Overweight);
    }

    #[test]
    fn test_exact_ties_round_away_from_zero() {
        assert_eq!(round_one_decimal(18.25), 18.3);
        assert_eq!(round_one_decimal(29.75), 29.8);
        assert_eq!(round_one_decimal(24.75), 24.8);
        assert_eq!(round_one_decimal(-0.25), -0.3);
        assert_eq!(round_one_decimal(0.125), 0.1);
    }

    #[test]
    fn test_negative_zero_displays_as_zero() {
        let r = reading("170", "-0.1");
        assert_eq!(r.display_value(), "0");
        assert_eq!(r.category, Category::Underweight);
        assert_eq!(format_bmi(-0.0), "0");
    }

    #[test]
    fn test_huge_values_use_exponent() {
        assert_eq!(format_bmi(1e21), "1e+21");
        assert_eq!(format_bmi(1.5e22), "1.5e+22");
        assert_eq!(format_bmi(-2e25), "-2e+25");
        assert_eq!(format_bmi(123456.7), "123456.7");
    }

    #[test]
    fn test_format_bmi() {
        assert_eq!(format_bmi(23.1), "23.1");
        assert_eq!(format_bmi(25.0), "25");
        assert_eq!(format_bmi(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_category_table_matches_thresholds() {
        let labels: Vec<&str> = CATEGORY_TABLE.iter().map(|r| r.category.label()).collect();
        assert_eq!(labels, ["Underweight", "Normal weight", "Overweight", "Obese"]);
        assert_eq!(CATEGORY_TABLE[3].range, "30 or greater");
    }
}
