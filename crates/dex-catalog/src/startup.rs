//! Startup state machine
//!
//! `Idle -> LoadingIndex -> LoadingCategories -> LoadingGroups -> Ready`, advancing
//! only on success. Any failure lands in the terminal `Failed` state and no partial
//! index is handed out.

use tracing::{error, info};

use dex_integration::CatalogSource;

use crate::error::CatalogError;
use crate::index::CatalogIndex;

/// Where startup currently is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InitState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Fetching the catalog index (0%)
    LoadingIndex,
    /// Fetching category memberships (30%)
    LoadingCategories,
    /// Fetching group memberships (70%)
    LoadingGroups,
    /// Index is complete and the browser is usable
    Ready,
    /// A startup fetch failed; terminal
    Failed(String),
}

impl InitState {
    /// Progress for a loading indicator (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        match self {
            Self::Idle | Self::LoadingIndex | Self::Failed(_) => 0.0,
            Self::LoadingCategories => 0.30,
            Self::LoadingGroups => 0.70,
            Self::Ready => 1.0,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "Waiting to start...",
            Self::LoadingIndex => "Loading catalog index...",
            Self::LoadingCategories => "Loading categories...",
            Self::LoadingGroups => "Loading groups...",
            Self::Ready => "Ready",
            Self::Failed(_) => "Failed to initialize",
        }
    }

    /// The state reached when this one succeeds
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::LoadingIndex),
            Self::LoadingIndex => Some(Self::LoadingCategories),
            Self::LoadingCategories => Some(Self::LoadingGroups),
            Self::LoadingGroups => Some(Self::Ready),
            Self::Ready | Self::Failed(_) => None,
        }
    }

    /// Whether user interaction is disabled
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            Self::LoadingIndex | Self::LoadingCategories | Self::LoadingGroups
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed(_))
    }
}

/// Drives the three startup fetches in sequence
#[derive(Debug, Default)]
pub struct Startup {
    state: InitState,
}

impl Startup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InitState {
        &self.state
    }

    /// Run startup to completion.
    pub async fn run<S>(&mut self, source: &S) -> Result<CatalogIndex, CatalogError>
    where
        S: CatalogSource + ?Sized,
    {
        self.run_with(source, |_| {}).await
    }

    /// Run startup, reporting every state entered to `on_state`.
    pub async fn run_with<S, F>(
        &mut self,
        source: &S,
        mut on_state: F,
    ) -> Result<CatalogIndex, CatalogError>
    where
        S: CatalogSource + ?Sized,
        F: FnMut(&InitState),
    {
        if self.state != InitState::Idle {
            return Err(CatalogError::AlreadyStarted);
        }

        self.advance(&mut on_state);
        let entries = match source.fetch_index().await {
            Ok(entries) => entries,
            Err(e) => return Err(self.fail("loading the index", e, &mut on_state)),
        };
        info!("Catalog index loaded: {} entries", entries.len());

        self.advance(&mut on_state);
        let categories = match source.fetch_category_memberships().await {
            Ok(categories) => categories,
            Err(e) => return Err(self.fail("loading categories", e, &mut on_state)),
        };
        info!("Categories loaded: {}", categories.names().len());

        self.advance(&mut on_state);
        let groups = match source.fetch_group_memberships().await {
            Ok(groups) => groups,
            Err(e) => return Err(self.fail("loading groups", e, &mut on_state)),
        };
        info!("Groups loaded: {}", groups.count());

        self.advance(&mut on_state);
        Ok(CatalogIndex::new(entries, categories, groups))
    }

    fn advance<F: FnMut(&InitState)>(&mut self, on_state: &mut F) {
        if let Some(next) = self.state.next() {
            self.state = next;
            on_state(&self.state);
        }
    }

    fn fail<F: FnMut(&InitState)>(
        &mut self,
        phase: &'static str,
        source: dex_integration::IntegrationError,
        on_state: &mut F,
    ) -> CatalogError {
        error!("Startup failed while {}: {}", phase, source);
        self.state = InitState::Failed(source.to_string());
        on_state(&self.state);
        CatalogError::Startup { phase, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{starter_source, FailAt};

    #[test]
    fn test_state_order() {
        let mut state = InitState::Idle;
        let mut seen = vec![state.clone()];
        while let Some(next) = state.next() {
            seen.push(next.clone());
            state = next;
        }
        assert_eq!(
            seen,
            vec![
                InitState::Idle,
                InitState::LoadingIndex,
                InitState::LoadingCategories,
                InitState::LoadingGroups,
                InitState::Ready,
            ]
        );
        assert!(InitState::Failed("x".into()).next().is_none());
    }

    #[test]
    fn test_starts_idle() {
        assert_eq!(InitState::default(), InitState::Idle);
        assert_eq!(Startup::new().state(), &InitState::Idle);
        assert!(!InitState::default().is_loading());
    }

    #[test]
    fn test_progress_increases() {
        assert!(InitState::LoadingIndex.progress() < InitState::LoadingCategories.progress());
        assert!(InitState::LoadingCategories.progress() < InitState::LoadingGroups.progress());
        assert_eq!(InitState::Ready.progress(), 1.0);
        assert!(InitState::LoadingGroups.is_loading());
        assert!(!InitState::Ready.is_loading());
    }

    #[tokio::test]
    async fn test_run_reaches_ready() {
        let source = starter_source();
        let mut startup = Startup::new();
        let mut seen = Vec::new();

        let index = startup
            .run_with(&source, |state| seen.push(state.clone()))
            .await
            .unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(startup.state(), &InitState::Ready);
        assert_eq!(seen.len(), 4);
        assert_eq!(seen.last(), Some(&InitState::Ready));
    }

    #[tokio::test]
    async fn test_failure_is_terminal() {
        for fail_at in [FailAt::Index, FailAt::Categories, FailAt::Groups] {
            let mut source = starter_source();
            source.fail_at = Some(fail_at);
            let mut startup = Startup::new();

            let err = startup.run(&source).await.unwrap_err();
            assert!(matches!(err, CatalogError::Startup { .. }));
            assert!(matches!(startup.state(), InitState::Failed(_)));
            assert!(startup.state().is_terminal());

            // Failed is terminal: running again is refused
            let again = startup.run(&source).await.unwrap_err();
            assert!(matches!(again, CatalogError::AlreadyStarted));
        }
    }

    #[tokio::test]
    async fn test_failure_reports_phase() {
        let mut source = starter_source();
        source.fail_at = Some(FailAt::Groups);
        let mut startup = Startup::new();

        let err = startup.run(&source).await.unwrap_err();
        assert!(err.to_string().contains("loading groups"));
    }
}
