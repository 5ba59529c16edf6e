use std::sync::Arc;

use tracing::debug;
use tulind_indicators::{IndicatorKind, IndicatorResult};

use crate::backend::ComputeBackend;
use crate::evaluator::Indicator;

/// Read-only mapping from identifier to [`Indicator`] descriptor, plus the engine version.
///
/// Built once and shared freely; queries take no locks.
pub struct Tulind {
    version: String,
    indicators: Vec<Indicator>,
}

impl Tulind {
    /// Binds every catalog entry to `backend`.
    pub fn new(backend: Arc<dyn ComputeBackend>) -> Self {
        let version = backend.version().to_string();
        let indicators: Vec<Indicator> = IndicatorKind::ALL
            .iter()
            .map(|kind| Indicator::new(*kind, Arc::clone(&backend)))
            .collect();
        debug!(%version, indicators = indicators.len(), "indicator registry ready");
        Self {
            version,
            indicators,
        }
    }

    /// Version string reported by the compute backend.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Resolves an identifier (or one of its legacy spellings) to its descriptor.
    pub fn lookup(&self, name: &str) -> IndicatorResult<&Indicator> {
        let kind = name.parse::<IndicatorKind>()?;
        Ok(self.get(kind))
    }

    /// Descriptor for a catalog entry.
    pub fn get(&self, kind: IndicatorKind) -> &Indicator {
        &self.indicators[kind as usize]
    }

    pub fn contains(&self, name: &str) -> bool {
        IndicatorKind::find(name).is_some()
    }

    /// Every descriptor, ordered by identifier.
    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn iter(&self) -> impl Iterator<Item = &Indicator> {
        self.indicators.iter()
    }

    /// Canonical identifiers in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        self.indicators
            .iter()
            .map(|indicator| indicator.kind().name())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use tulind_indicators::{ErrorKind, IndicatorKind};

    use super::*;
    use crate::backend::BackendError;

    struct NullBackend;

    impl ComputeBackend for NullBackend {
        fn version(&self) -> &str {
            "0.0.0-null"
        }

        fn compute(
            &self,
            _kind: IndicatorKind,
            _inputs: &[&[f64]],
            _options: &[f64],
            _outputs: &mut [Vec<f64>],
        ) -> Result<(), BackendError> {
            Err(BackendError::new("null backend"))
        }
    }

    fn registry() -> Tulind {
        Tulind::new(Arc::new(NullBackend))
    }

    #[test]
    fn exposes_backend_version() {
        assert_eq!(registry().version(), "0.0.0-null");
    }

    #[test]
    fn every_kind_is_registered_at_its_index() {
        let registry = registry();
        assert_eq!(registry.len(), IndicatorKind::ALL.len());
        for kind in IndicatorKind::ALL {
            assert_eq!(registry.get(*kind).kind(), *kind);
        }
    }

    #[test]
    fn lookup_by_name_and_alias() {
        let registry = registry();
        assert_eq!(registry.lookup("rsi").unwrap().kind(), IndicatorKind::Rsi);
        assert_eq!(registry.lookup("asxr").unwrap().kind(), IndicatorKind::Adxr);
        assert!(registry.contains("bbands"));
    }

    #[test]
    fn unknown_name_fails() {
        let err = registry().lookup("notreal").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownIdentifier);
        assert!(!registry().contains("notreal"));
    }

    #[test]
    fn names_are_sorted() {
        let names = registry().names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.first(), Some(&"abs"));
        assert_eq!(names.last(), Some(&"zlema"));
    }
}
