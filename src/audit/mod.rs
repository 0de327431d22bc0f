//! The audit wizard state machine.
//!
//! Four steps: Landing -> Form -> Analysis -> Results, with a reset edge
//! from Results back to Form. The Analysis step is driven by a repeating
//! ticker task that the machine owns; the ticker is aborted on any exit
//! from Analysis so a late tick can never mutate a step it no longer
//! belongs to.

pub mod report;

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

pub use report::{mock_report, AuditReport};

/// Fixed number of competitor URL slots on the form.
pub const COMPETITOR_SLOTS: usize = 3;

/// Progress added per ticker tick. Divides 100 evenly, so the gauge lands
/// on exactly 100 after 50 ticks.
pub const PROGRESS_STEP: u8 = 2;

/// Progress value that completes the analysis.
pub const PROGRESS_DONE: u8 = 100;

/// Ticker cadence while in the Analysis step.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Preset choices for the industry selector.
pub const INDUSTRIES: &[&str] = &[
    "SaaS/Technology",
    "E-commerce",
    "Healthcare",
    "Financial Services",
    "Education",
    "Real Estate",
    "Other",
];

/// Preset choices for the campaign type selector.
pub const CAMPAIGN_TYPES: &[&str] = &[
    "Lead Generation",
    "Product Sales",
    "App Download",
    "Webinar Signup",
    "Consultation Booking",
];

/// Everything the user fills in before submitting. All fields are free-form
/// strings; "required" is a label on the form, not a gate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditForm {
    pub primary_url: String,
    pub company_name: String,
    pub industry: String,
    pub competitor_urls: [String; COMPETITOR_SLOTS],
    pub campaign_type: String,
    pub target_audience: String,
}

/// Focusable form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    PrimaryUrl,
    CompanyName,
    Industry,
    Competitor1,
    Competitor2,
    Competitor3,
    CampaignType,
    TargetAudience,
}

impl FormField {
    pub const ALL: &'static [FormField] = &[
        FormField::PrimaryUrl,
        FormField::CompanyName,
        FormField::Industry,
        FormField::Competitor1,
        FormField::Competitor2,
        FormField::Competitor3,
        FormField::CampaignType,
        FormField::TargetAudience,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::PrimaryUrl => "Landing Page URL",
            FormField::CompanyName => "Company/Campaign Name",
            FormField::Industry => "Industry/Vertical",
            FormField::Competitor1 => "Competitor 1 URL",
            FormField::Competitor2 => "Competitor 2 URL",
            FormField::Competitor3 => "Competitor 3 URL",
            FormField::CampaignType => "Campaign Type/Goal",
            FormField::TargetAudience => "Target Audience",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::PrimaryUrl => "https://example.com/landing-page",
            FormField::CompanyName => "Acme Corp",
            FormField::Industry => "Left/Right to select",
            FormField::Competitor1 | FormField::Competitor2 | FormField::Competitor3 => {
                "https://competitor.com/landing-page"
            }
            FormField::CampaignType => "Left/Right to select",
            FormField::TargetAudience => "Small business owners, age 30-50",
        }
    }

    /// Marked with `*` on the form. Cosmetic only: submission is not blocked.
    pub fn required(&self) -> bool {
        matches!(
            self,
            FormField::PrimaryUrl | FormField::CompanyName | FormField::Industry
        )
    }

    /// Preset list for selector fields, None for free-text fields.
    pub fn choices(&self) -> Option<&'static [&'static str]> {
        match self {
            FormField::Industry => Some(INDUSTRIES),
            FormField::CampaignType => Some(CAMPAIGN_TYPES),
            _ => None,
        }
    }

    fn competitor_slot(&self) -> Option<usize> {
        match self {
            FormField::Competitor1 => Some(0),
            FormField::Competitor2 => Some(1),
            FormField::Competitor3 => Some(2),
            _ => None,
        }
    }
}

impl AuditForm {
    /// Overwrite a single named field, leaving every other field untouched.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        if let Some(slot) = field.competitor_slot() {
            self.set_competitor(slot, value);
            return;
        }
        let value = value.into();
        match field {
            FormField::PrimaryUrl => self.primary_url = value,
            FormField::CompanyName => self.company_name = value,
            FormField::Industry => self.industry = value,
            FormField::CampaignType => self.campaign_type = value,
            FormField::TargetAudience => self.target_audience = value,
            // Competitor slots handled above
            _ => {}
        }
    }

    /// Overwrite one competitor slot by position. Out-of-range slots are
    /// ignored; the form always has exactly three.
    pub fn set_competitor(&mut self, slot: usize, url: impl Into<String>) {
        if let Some(entry) = self.competitor_urls.get_mut(slot) {
            *entry = url.into();
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        if let Some(slot) = field.competitor_slot() {
            return &self.competitor_urls[slot];
        }
        match field {
            FormField::PrimaryUrl => &self.primary_url,
            FormField::CompanyName => &self.company_name,
            FormField::Industry => &self.industry,
            FormField::CampaignType => &self.campaign_type,
            FormField::TargetAudience => &self.target_audience,
            _ => unreachable!("competitor fields handled above"),
        }
    }
}

/// Wizard step. Each variant carries only the data that step needs; the
/// form record travels along so Results -> Form keeps the entered values.
#[derive(Debug)]
pub enum Step {
    Landing,
    Form { form: AuditForm },
    Analysis { form: AuditForm, progress: u8 },
    Results { form: AuditForm, report: AuditReport },
}

/// Repeating task that sends one unit per [`TICK_INTERVAL`] while alive.
/// Dropping the handle aborts the task, so the ticker cannot outlive the
/// Analysis step that spawned it.
#[derive(Debug)]
pub struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    pub fn spawn(tx: UnboundedSender<()>) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(TICK_INTERVAL);
            ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first interval tick resolves immediately; swallow it so
            // the gauge holds at 0 for one full interval.
            ticks.tick().await;
            loop {
                ticks.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// The wizard itself: current step plus the ticker handle for the Analysis
/// step. Every transition method is a no-op outside its source step.
pub struct Auditor {
    step: Step,
    ticker: Option<ProgressTicker>,
}

impl Auditor {
    pub fn new() -> Self {
        Self {
            step: Step::Landing,
            ticker: None,
        }
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    /// The form record, whichever step currently holds it.
    pub fn form(&self) -> Option<&AuditForm> {
        match &self.step {
            Step::Landing => None,
            Step::Form { form }
            | Step::Analysis { form, .. }
            | Step::Results { form, .. } => Some(form),
        }
    }

    pub fn progress(&self) -> Option<u8> {
        match &self.step {
            Step::Analysis { progress, .. } => Some(*progress),
            _ => None,
        }
    }

    pub fn report(&self) -> Option<&AuditReport> {
        match &self.step {
            Step::Results { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Landing -> Form with an empty form.
    pub fn start(&mut self) {
        if matches!(self.step, Step::Landing) {
            self.step = Step::Form {
                form: AuditForm::default(),
            };
        }
    }

    /// Edit one field of the form. Only meaningful on the Form step.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        if let Step::Form { form } = &mut self.step {
            form.set(field, value);
        }
    }

    /// Edit one competitor slot. Only meaningful on the Form step.
    pub fn set_competitor(&mut self, slot: usize, url: impl Into<String>) {
        if let Step::Form { form } = &mut self.step {
            form.set_competitor(slot, url);
        }
    }

    /// Form -> Analysis. Progress always restarts at 0 and a fresh ticker
    /// is spawned. Submission is deliberately unguarded: empty required
    /// fields do not block it.
    pub fn submit(&mut self, tick_tx: &UnboundedSender<()>) {
        if !matches!(self.step, Step::Form { .. }) {
            return;
        }
        if let Step::Form { form } = std::mem::replace(&mut self.step, Step::Landing) {
            tracing::info!(url = %form.primary_url, "starting analysis");
            self.step = Step::Analysis { form, progress: 0 };
            self.ticker = Some(ProgressTicker::spawn(tick_tx.clone()));
        }
    }

    /// One ticker tick. Advances progress while in Analysis and performs
    /// the Analysis -> Results transition exactly once when progress hits
    /// 100. Ticks in any other step change nothing. Returns true on the
    /// completing tick.
    pub fn on_tick(&mut self) -> bool {
        let Step::Analysis { progress, .. } = &mut self.step else {
            return false;
        };
        *progress = progress.saturating_add(PROGRESS_STEP).min(PROGRESS_DONE);
        if *progress < PROGRESS_DONE {
            return false;
        }
        self.ticker = None;
        if let Step::Analysis { form, .. } = std::mem::replace(&mut self.step, Step::Landing) {
            tracing::info!("analysis complete");
            self.step = Step::Results {
                form,
                report: report::mock_report(),
            };
        }
        true
    }

    /// Analysis -> Form. Stops the ticker and discards the partial
    /// progress; the form values stay.
    pub fn cancel(&mut self) {
        if !matches!(self.step, Step::Analysis { .. }) {
            return;
        }
        self.ticker = None;
        if let Step::Analysis { form, .. } = std::mem::replace(&mut self.step, Step::Landing) {
            tracing::info!("analysis cancelled");
            self.step = Step::Form { form };
        }
    }

    /// Results -> Form. Drops the report, keeps the form values so the
    /// next run starts pre-filled.
    pub fn reset(&mut self) {
        if !matches!(self.step, Step::Results { .. }) {
            return;
        }
        if let Step::Results { form, .. } = std::mem::replace(&mut self.step, Step::Landing) {
            self.step = Step::Form { form };
        }
    }

    #[cfg(test)]
    fn ticker_active(&self) -> bool {
        self.ticker.is_some()
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn starts_on_landing_and_moves_to_form() {
        let mut auditor = Auditor::new();
        assert!(matches!(auditor.step(), Step::Landing));
        auditor.start();
        assert!(matches!(auditor.step(), Step::Form { .. }));
        // start() is only an edge out of Landing
        auditor.set_field(FormField::CompanyName, "Acme");
        auditor.start();
        assert_eq!(auditor.form().unwrap().company_name, "Acme");
    }

    #[test]
    fn field_edit_touches_only_the_target() {
        let mut form = AuditForm::default();
        form.set(FormField::PrimaryUrl, "https://x.com");
        form.set(FormField::CompanyName, "Acme");
        form.set_competitor(1, "https://rival.com");

        let before = form.clone();
        form.set(FormField::Industry, "E-commerce");

        assert_eq!(form.industry, "E-commerce");
        assert_eq!(form.primary_url, before.primary_url);
        assert_eq!(form.company_name, before.company_name);
        assert_eq!(form.competitor_urls, before.competitor_urls);
        assert_eq!(form.campaign_type, before.campaign_type);
        assert_eq!(form.target_audience, before.target_audience);
    }

    #[test]
    fn competitor_edit_touches_only_its_slot() {
        let mut form = AuditForm::default();
        form.set_competitor(0, "https://a.com");
        form.set_competitor(2, "https://c.com");
        form.set_competitor(1, "https://b.com");
        assert_eq!(
            form.competitor_urls,
            ["https://a.com", "https://b.com", "https://c.com"]
        );
    }

    #[test]
    fn out_of_range_competitor_slot_is_ignored() {
        let mut form = AuditForm::default();
        form.set_competitor(COMPETITOR_SLOTS, "https://nope.com");
        assert_eq!(form, AuditForm::default());
    }

    #[test]
    fn form_field_get_mirrors_set() {
        let mut form = AuditForm::default();
        for field in FormField::ALL {
            form.set(*field, field.label());
        }
        for field in FormField::ALL {
            assert_eq!(form.get(*field), field.label());
        }
    }

    #[test]
    fn tick_outside_analysis_changes_nothing() {
        let mut auditor = Auditor::new();
        assert!(!auditor.on_tick());
        assert!(matches!(auditor.step(), Step::Landing));

        auditor.start();
        auditor.set_field(FormField::CompanyName, "Acme");
        assert!(!auditor.on_tick());
        assert!(matches!(auditor.step(), Step::Form { .. }));
        assert_eq!(auditor.form().unwrap().company_name, "Acme");
    }

    #[test]
    fn progress_clamps_at_done() {
        let mut auditor = Auditor {
            step: Step::Analysis {
                form: AuditForm::default(),
                progress: 99,
            },
            ticker: None,
        };
        assert!(auditor.on_tick());
        assert!(matches!(auditor.step(), Step::Results { .. }));
    }

    #[test]
    fn completion_fires_exactly_once() {
        let mut auditor = Auditor {
            step: Step::Analysis {
                form: AuditForm::default(),
                progress: 98,
            },
            ticker: None,
        };
        assert!(auditor.on_tick());
        // Already on Results; a stray tick must not re-fire or change state
        assert!(!auditor.on_tick());
        assert!(matches!(auditor.step(), Step::Results { .. }));
    }

    #[tokio::test]
    async fn submit_resets_progress_and_spawns_ticker() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut auditor = Auditor::new();
        auditor.start();
        auditor.submit(&tx);
        assert_eq!(auditor.progress(), Some(0));
        assert!(auditor.ticker_active());
    }

    #[tokio::test]
    async fn cancel_stops_ticker_and_returns_to_form() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut auditor = Auditor::new();
        auditor.start();
        auditor.set_field(FormField::PrimaryUrl, "https://x.com");
        auditor.submit(&tx);
        auditor.on_tick();
        auditor.on_tick();
        assert_eq!(auditor.progress(), Some(2 * PROGRESS_STEP));

        auditor.cancel();
        assert!(!auditor.ticker_active());
        assert!(matches!(auditor.step(), Step::Form { .. }));
        assert_eq!(auditor.form().unwrap().primary_url, "https://x.com");

        // Post-exit ticks are no-ops
        assert!(!auditor.on_tick());
        assert!(matches!(auditor.step(), Step::Form { .. }));
        assert_eq!(auditor.progress(), None);
    }

    #[tokio::test]
    async fn full_run_lands_on_results_after_fifty_ticks() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut auditor = Auditor::new();
        auditor.start();
        auditor.set_field(FormField::PrimaryUrl, "https://x.com");
        auditor.set_field(FormField::CompanyName, "Acme");
        auditor.submit(&tx);

        let mut completions = 0;
        for tick in 1u8..=50 {
            if auditor.on_tick() {
                completions += 1;
                assert_eq!(tick, 50);
            } else {
                // Monotonically non-decreasing and never past 100
                let progress = auditor.progress().unwrap();
                assert_eq!(progress, tick * PROGRESS_STEP);
            }
        }
        assert_eq!(completions, 1);
        assert!(!auditor.ticker_active());

        let report = auditor.report().expect("results step holds a report");
        assert_eq!(*report, mock_report());
        assert_eq!(auditor.form().unwrap().company_name, "Acme");
    }

    #[tokio::test]
    async fn reset_keeps_form_values_and_clears_report() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut auditor = Auditor::new();
        auditor.start();
        auditor.set_field(FormField::PrimaryUrl, "https://x.com");
        auditor.set_field(FormField::CompanyName, "Acme");
        auditor.submit(&tx);
        while !auditor.on_tick() {}

        auditor.reset();
        assert!(matches!(auditor.step(), Step::Form { .. }));
        assert!(auditor.report().is_none());
        assert_eq!(auditor.progress(), None);
        let form = auditor.form().unwrap();
        assert_eq!(form.primary_url, "https://x.com");
        assert_eq!(form.company_name, "Acme");

        // Second run starts back at 0
        auditor.submit(&tx);
        assert_eq!(auditor.progress(), Some(0));
    }

    #[tokio::test]
    async fn ticker_sends_on_its_cadence_and_stops_on_drop() {
        tokio::time::pause();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = ProgressTicker::spawn(tx);
        // Let the task run far enough to register its interval timer,
        // otherwise advancing virtual time fires nothing
        tokio::task::yield_now().await;

        tokio::time::advance(TICK_INTERVAL * 3).await;
        tokio::task::yield_now().await;
        let mut received = 0;
        while rx.try_recv().is_ok() {
            received += 1;
        }
        assert!(received >= 1);

        drop(ticker);
        tokio::task::yield_now().await;
        while rx.try_recv().is_ok() {}
        tokio::time::advance(TICK_INTERVAL * 3).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }
}
