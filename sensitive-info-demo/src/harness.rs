//! Concurrent rendering workload.
//!
//! Each scenario spawns one task per render and logs every rendered line,
//! the way a busy service would log a request payload.

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::ValueEnum;
use sensitive_info::render;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::models::Samples;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Scenario {
    /// Plain `Debug`, nothing masked.
    Plain,
    /// Hand-written renderers.
    Overridden,
    /// Derived masking from field attributes.
    Annotated,
}

impl Scenario {
    pub(crate) const ALL: [Scenario; 3] =
        [Scenario::Plain, Scenario::Overridden, Scenario::Annotated];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Scenario::Plain => "nonAnnotatedFields",
            Scenario::Overridden => "overriddenFields",
            Scenario::Annotated => "annotatedFields",
        }
    }
}

/// Run-wide settings.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Settings {
    pub(crate) tasks: usize,
    pub(crate) quiet: bool,
}

/// Elapsed time of one scenario.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Timing {
    pub(crate) label: &'static str,
    pub(crate) elapsed: Duration,
}

pub(crate) struct Harness {
    samples: Arc<Samples>,
    settings: Settings,
}

impl Harness {
    pub(crate) fn new(samples: Samples, settings: Settings) -> Self {
        Self {
            samples: Arc::new(samples),
            settings,
        }
    }

    /// Renders a constant string `tasks` times so the runtime's worker
    /// threads are up before anything is timed.
    pub(crate) async fn warm_up(&self) -> anyhow::Result<Timing> {
        self.fan_out("warmingTime", Arc::new("pre warming"), |value| {
            render(&**value)
        })
        .await
    }

    pub(crate) async fn run(&self, scenario: Scenario) -> anyhow::Result<Timing> {
        let samples = Arc::clone(&self.samples);
        match scenario {
            Scenario::Plain => {
                self.fan_out(scenario.label(), samples, |s| render(&s.plain))
                    .await
            }
            Scenario::Overridden => {
                self.fan_out(scenario.label(), samples, |s| render(&s.overridden))
                    .await
            }
            Scenario::Annotated => {
                self.fan_out(scenario.label(), samples, |s| render(&s.annotated))
                    .await
            }
        }
    }

    async fn fan_out<T, F>(
        &self,
        label: &'static str,
        value: Arc<T>,
        render_one: F,
    ) -> anyhow::Result<Timing>
    where
        T: Send + Sync + 'static + ?Sized,
        F: Fn(&Arc<T>) -> String + Copy + Send + 'static,
    {
        let Settings { tasks, quiet } = self.settings;
        debug!(label, tasks, "spawning render tasks");

        let started = Instant::now();
        let mut set = JoinSet::new();
        for _ in 0..tasks {
            let value = Arc::clone(&value);
            set.spawn(async move {
                let line = render_one(&value);
                if !quiet {
                    info!("Sensitive data protection --{label}: [{line}]");
                }
                line.len()
            });
        }

        let mut rendered_bytes = 0;
        while let Some(joined) = set.join_next().await {
            rendered_bytes += joined.with_context(|| format!("render task for {label} failed"))?;
        }
        let elapsed = started.elapsed();
        debug!(label, rendered_bytes, "render tasks finished");

        Ok(Timing { label, elapsed })
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sensitive data protection --{} --elapsedTime: [{:.3} seconds]",
            self.label,
            self.elapsed.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn harness(tasks: usize) -> Harness {
        let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        Harness::new(Samples::new(today), Settings { tasks, quiet: true })
    }

    #[tokio::test]
    async fn every_scenario_completes() {
        let harness = harness(32);
        harness.warm_up().await.unwrap();
        for scenario in Scenario::ALL {
            let timing = harness.run(scenario).await.unwrap();
            assert_eq!(timing.label, scenario.label());
        }
    }

    #[tokio::test]
    async fn zero_tasks_is_a_no_op() {
        let timing = harness(0).run(Scenario::Annotated).await.unwrap();
        assert_eq!(timing.label, "annotatedFields");
    }

    #[test]
    fn timing_is_displayed_in_seconds() {
        let timing = Timing {
            label: "annotatedFields",
            elapsed: Duration::from_millis(1500),
        };
        assert_eq!(
            timing.to_string(),
            "Sensitive data protection --annotatedFields --elapsedTime: [1.500 seconds]"
        );
    }
}
