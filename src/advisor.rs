//! 规则式健康建议
//!
//! 纯函数：根据（当前读数, 用户输入）查表给出回复，不调用任何外部服务，也无随机性。
//! 决策顺序：未计算 → 提示先计算；含 diet/eat → 饮食建议；含 exercise/workout → 运动建议；否则通用模板。

use crate::bmi::{BmiReading, Category};

/// 未计算 BMI 时的固定提示
pub const CALCULATE_FIRST: &str =
    "Please calculate your BMI first so I can provide more specific advice.";

/// 用户输入命中的话题
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topic {
    Diet,
    Exercise,
}

impl Topic {
    /// 大小写不敏感的子串匹配；饮食优先于运动
    pub fn detect(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        if lower.contains("diet") || lower.contains("eat") {
            Some(Topic::Diet)
        } else if lower.contains("exercise") || lower.contains("workout") {
            Some(Topic::Exercise)
        } else {
            None
        }
    }
}

/// 建议分组：偏瘦 / 超重或肥胖 / 正常
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdviceGroup {
    Underweight,
    AboveNormal,
    Healthy,
}

impl From<Category> for AdviceGroup {
    fn from(category: Category) -> Self {
        match category {
            Category::Underweight => AdviceGroup::Underweight,
            Category::Overweight | Category::Obese => AdviceGroup::AboveNormal,
            Category::NormalWeight => AdviceGroup::Healthy,
        }
    }
}

/// 话题 × 分组 的固定回复表
pub fn advice(topic: Topic, group: AdviceGroup) -> &'static str {
    match (topic, group) {
        (Topic::Diet, AdviceGroup::Underweight) => {
            "For underweight individuals, focus on nutrient-dense foods like nuts, whole grains, lean proteins, and healthy fats. Consider eating more frequent meals and adding healthy snacks between meals."
        }
        (Topic::Diet, AdviceGroup::AboveNormal) => {
            "Focus on a balanced diet rich in vegetables, lean proteins, and whole grains. Control portion sizes and consider tracking your daily calorie intake."
        }
        (Topic::Diet, AdviceGroup::Healthy) => {
            "Maintain your healthy weight by continuing a balanced diet with plenty of vegetables, fruits, lean proteins, and whole grains."
        }
        (Topic::Exercise, AdviceGroup::Underweight) => {
            "Focus on strength training exercises to build muscle mass. Include exercises like push-ups, squats, and lightweight training."
        }
        (Topic::Exercise, AdviceGroup::AboveNormal) => {
            "Start with low-impact exercises like walking, swimming, or cycling. Gradually increase intensity as your fitness improves."
        }
        (Topic::Exercise, AdviceGroup::Healthy) => {
            "Continue with a mix of cardio and strength training exercises. Aim for at least 150 minutes of moderate activity per week."
        }
    }
}

/// 生成助手回复
pub fn respond(reading: Option<&BmiReading>, text: &str) -> String {
    let Some(reading) = reading else {
        return CALCULATE_FIRST.to_string();
    };

    match Topic::detect(text) {
        Some(topic) => advice(topic, reading.category.into()).to_string(),
        None => format!(
            "Based on your BMI of {} ({}), I recommend consulting with a healthcare provider for personalized advice. Would you like specific tips about diet or exercise?",
            reading.display_value(),
            reading.category
        ),
    }
}
