use serde::{Deserialize, Serialize};

/// A unit of work scheduled in input order.
///
/// `norm_days` is the effort in business days at a 100% time allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(rename = "normDays", alias = "nrNormDays", alias = "norm_days")]
    pub norm_days: f64,
}

impl Task {
    pub fn new(id: impl Into<String>, norm_days: f64) -> Self {
        Self {
            id: id.into(),
            norm_days,
        }
    }
}

/// Total normalized effort, summed in task order.
pub fn total_norm_days(tasks: &[Task]) -> f64 {
    tasks.iter().fold(0.0, |acc, task| acc + task.norm_days)
}
