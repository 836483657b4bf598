use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

/// notable things that happened while simulating a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScheduleEvent {
    RateChanged {
        period: u32,
        old_rate: Rate,
        new_rate: Rate,
        new_repayment: Money,
    },
    RepaymentRecalculated {
        period: u32,
        old_repayment: Money,
        new_repayment: Money,
        remaining_periods: u32,
    },
    ExtraRepaymentApplied {
        period: u32,
        requested: Money,
        applied: Money,
        /// deposit beyond the outstanding balance, discarded
        surplus: Money,
    },
    InterestCapitalized {
        period: u32,
        amount: Money,
        new_balance: Money,
    },
    PaidOff {
        period: u32,
        date: NaiveDate,
    },
}

impl ScheduleEvent {
    pub fn period(&self) -> u32 {
        match self {
            ScheduleEvent::RateChanged { period, .. }
            | ScheduleEvent::RepaymentRecalculated { period, .. }
            | ScheduleEvent::ExtraRepaymentApplied { period, .. }
            | ScheduleEvent::InterestCapitalized { period, .. }
            | ScheduleEvent::PaidOff { period, .. } => *period,
        }
    }
}

/// event store for collecting events during a simulation
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<ScheduleEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: ScheduleEvent) {
        log::trace!("schedule event: {:?}", event);
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<ScheduleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[ScheduleEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
