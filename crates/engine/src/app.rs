//! Application state and composition.

use std::sync::Arc;

use config::ConfigError;
use parley_domain::NegotiationRules;

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    config::EngineConfig,
    memory::InMemoryNegotiationRepo,
    ports::{ClockPort, NarrativeLogPort, NegotiationRepo, RandomPort},
};
use crate::use_cases::{
    CompletionNotifier, NegotiationCrud, NegotiationLifecycle, NegotiationUseCases,
    RecordArgument, RevealInformation,
};

/// Main application state.
///
/// Holds the session store and the use cases wired over it. Hosts embed one
/// `App` and call into `use_cases`.
pub struct App {
    pub repo: Arc<dyn NegotiationRepo>,
    pub rules: Arc<NegotiationRules>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub negotiation: NegotiationUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        repo: Arc<dyn NegotiationRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        rules: NegotiationRules,
        narrative_log: Option<Arc<dyn NarrativeLogPort>>,
    ) -> Self {
        let rules = Arc::new(rules);
        let notifier = Arc::new(CompletionNotifier::new(narrative_log));

        let negotiation = NegotiationUseCases::new(
            NegotiationCrud::new(repo.clone(), clock.clone()),
            NegotiationLifecycle::new(repo.clone(), clock.clone(), notifier.clone()),
            RecordArgument::new(
                repo.clone(),
                clock.clone(),
                random,
                rules.clone(),
                notifier,
            ),
            RevealInformation::new(repo.clone(), clock),
        );

        Self {
            repo,
            rules,
            use_cases: UseCases { negotiation },
        }
    }

    /// An App over the in-memory store, the system clock and the configured rules.
    pub fn in_memory(config: &EngineConfig) -> Result<Self, ConfigError> {
        let rules = config.rules()?;
        Ok(Self::new(
            Arc::new(InMemoryNegotiationRepo::new()),
            Arc::new(SystemClock::new()),
            Arc::new(SystemRandom::new()),
            rules,
            None,
        ))
    }
}
