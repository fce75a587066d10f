use crate::metrics::TrendStatus;
use serde::Serialize;

/// Rule-based advice block selected by the trend score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    ExplosiveGrowth,
    StableGrowth,
    Maturing,
}

impl Recommendation {
    pub fn for_score(trend_score: u8) -> Self {
        match TrendStatus::from_score(trend_score) {
            TrendStatus::Hot => Recommendation::ExplosiveGrowth,
            TrendStatus::Emerging => Recommendation::StableGrowth,
            TrendStatus::Maturing => Recommendation::Maturing,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Recommendation::ExplosiveGrowth => "🔥",
            Recommendation::StableGrowth => "📈",
            Recommendation::Maturing => "💤",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Recommendation::ExplosiveGrowth => "Технология показывает взрывной рост. Рекомендуется:",
            Recommendation::StableGrowth => "Стабильный рост. Рекомендуется:",
            Recommendation::Maturing => "Технология в стадии созревания. Рекомендуется:",
        }
    }

    pub fn actions(self) -> [&'static str; 3] {
        match self {
            Recommendation::ExplosiveGrowth => [
                "Активно инвестировать в R&D",
                "Усилить патентную защиту",
                "Мониторить стартапы в этой области",
            ],
            Recommendation::StableGrowth => [
                "Продолжать текущие разработки",
                "Анализировать конкурентные патенты",
                "Рассмотреть стратегические партнерства",
            ],
            Recommendation::Maturing => [
                "Оптимизировать существующие решения",
                "Искать новые ниши применения",
                "Мониторить смежные области",
            ],
        }
    }

    /// Headline followed by bulleted actions, as printed in the report
    pub fn lines(self) -> Vec<String> {
        std::iter::once(self.headline().to_string())
            .chain(self.actions().iter().map(|a| format!("• {}", a)))
            .collect()
    }
}
