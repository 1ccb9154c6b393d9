use crate::domain::model::{IntervalDescriptor, PlanInterval};

pub fn plan_name_for_interval(interval: PlanInterval) -> &'static str {
    match interval {
        PlanInterval::Year => "Annual",
        PlanInterval::Month => "Monthly",
        PlanInterval::Week => "Weekly",
        PlanInterval::Day => "Daily",
    }
}

pub fn help_text_for_interval(interval: PlanInterval) -> &'static str {
    match interval {
        PlanInterval::Year => "You're getting two months free by choosing an Annual plan!",
        PlanInterval::Month => "Upgrade to annual pricing to get two free months.",
        _ => "Good choice!",
    }
}

pub fn active_plan_interval_metadata(intervals: &[PlanInterval]) -> Vec<IntervalDescriptor> {
    intervals
        .iter()
        .map(|&interval| IntervalDescriptor {
            interval,
            name: plan_name_for_interval(interval).to_string(),
            help_text: help_text_for_interval(interval).to_string(),
        })
        .collect()
}
