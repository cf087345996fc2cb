//! Progress bar above the wizard, derived purely from the current step.

use super::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

pub fn status(step: Step, current: Step) -> StepStatus {
    if step < current {
        StepStatus::Completed
    } else if step == current {
        StepStatus::Active
    } else {
        StepStatus::Pending
    }
}

pub fn items(current: Step) -> [(Step, StepStatus); 4] {
    Step::ALL.map(|step| (step, status(step, current)))
}

/// `[✓] Date & Time ── [2] Select Table ── (3) Your Info ── (4) Confirmation`
pub fn render(current: Step) -> String {
    items(current)
        .iter()
        .map(|(step, status)| match status {
            StepStatus::Completed => format!("[✓] {}", step.label()),
            StepStatus::Active => format!("[{}] {}", step.number(), step.label()),
            StepStatus::Pending => format!("({}) {}", step.number(), step.label()),
        })
        .collect::<Vec<_>>()
        .join(" ── ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_current_step() {
        let statuses: Vec<StepStatus> = items(Step::ContactInfo).iter().map(|(_, s)| *s).collect();
        assert_eq!(
            statuses,
            vec![
                StepStatus::Completed,
                StepStatus::Completed,
                StepStatus::Active,
                StepStatus::Pending
            ]
        );
    }

    #[test]
    fn first_step_rendering() {
        assert_eq!(
            render(Step::DateTime),
            "[1] Date & Time ── (2) Select Table ── (3) Your Info ── (4) Confirmation"
        );
    }
}
