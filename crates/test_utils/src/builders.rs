//! Test Data Builders
//!
//! Provides builders for aggregates and for the collaborators a wizard
//! controller needs. Tests specify only what matters to them and take
//! defaults for everything else.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use core_kernel::{Clock, RandomSource};
use domain_document::{
    DocumentComposer, DocumentError, DocumentRenderer, Localizer, RenderedArtifact,
    ReservationDocument,
};
use domain_reservation::{
    PaymentInfo, PropertyInfo, RenterInfo, ReservationAggregate, Section, SnapshotStore,
    SnapshotVault, StayInfo,
};
use infra_storage::InMemorySnapshotStore;
use rust_decimal_macros::dec;

use crate::fixtures::{DateFixtures, RecordFixtures};

/// Storage key used by every test vault
pub const TEST_STORAGE_KEY: &str = "rezervasyon_form_data";

/// Builder for reservation aggregates
///
/// Starts complete; use `without` to blank sections.
pub struct AggregateBuilder {
    renter: Option<RenterInfo>,
    property: Option<PropertyInfo>,
    stay: Option<StayInfo>,
    payment: Option<PaymentInfo>,
}

impl Default for AggregateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregateBuilder {
    /// Creates a builder with all four sections filled
    pub fn new() -> Self {
        Self {
            renter: Some(RecordFixtures::renter()),
            property: Some(RecordFixtures::property()),
            stay: Some(RecordFixtures::stay(2)),
            payment: Some(RecordFixtures::payment(dec!(20000), dec!(5000), dec!(5000))),
        }
    }

    /// Creates a builder with no sections
    pub fn empty() -> Self {
        Self {
            renter: None,
            property: None,
            stay: None,
            payment: None,
        }
    }

    pub fn with_renter(mut self, renter: RenterInfo) -> Self {
        self.renter = Some(renter);
        self
    }

    pub fn with_property(mut self, property: PropertyInfo) -> Self {
        self.property = Some(property);
        self
    }

    pub fn with_stay(mut self, stay: StayInfo) -> Self {
        self.stay = Some(stay);
        self
    }

    pub fn with_payment(mut self, payment: PaymentInfo) -> Self {
        self.payment = Some(payment);
        self
    }

    /// Clears one section
    pub fn without(mut self, section: Section) -> Self {
        match section {
            Section::Renter => self.renter = None,
            Section::Property => self.property = None,
            Section::Stay => self.stay = None,
            Section::Payment => self.payment = None,
        }
        self
    }

    pub fn build(self) -> ReservationAggregate {
        ReservationAggregate {
            renter: self.renter,
            property: self.property,
            stay: self.stay,
            payment: self.payment,
        }
    }
}

/// Builder for document composers with fixed time and randomness
pub struct ComposerBuilder {
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    locale: String,
}

impl Default for ComposerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposerBuilder {
    pub fn new() -> Self {
        Self {
            clock: Arc::new(DateFixtures::clock()),
            random: Arc::new(DateFixtures::random()),
            locale: "tr-TR".to_string(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Arc::new(random);
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn build(self) -> DocumentComposer {
        let localizer = Localizer::new(&self.locale)
            .unwrap_or_else(|e| panic!("test localizer for {}: {e}", self.locale));
        DocumentComposer::new(localizer, self.clock, self.random)
    }
}

/// A vault over a fresh in-memory store, returned with the store itself
pub fn memory_vault() -> (Arc<InMemorySnapshotStore>, SnapshotVault) {
    vault_over(InMemorySnapshotStore::new())
}

/// A vault whose store rejects anything larger than `bytes`
pub fn quota_vault(bytes: usize) -> (Arc<InMemorySnapshotStore>, SnapshotVault) {
    vault_over(InMemorySnapshotStore::with_quota(bytes))
}

fn vault_over(store: InMemorySnapshotStore) -> (Arc<InMemorySnapshotStore>, SnapshotVault) {
    let store = Arc::new(store);
    let dyn_store: Arc<dyn SnapshotStore> = store.clone();
    (store, SnapshotVault::new(dyn_store, TEST_STORAGE_KEY))
}

/// Renderer that fails a configured number of times, then delegates
pub struct FlakyRenderer<R> {
    inner: R,
    failures_left: AtomicUsize,
    calls: AtomicUsize,
}

impl<R: DocumentRenderer> FlakyRenderer<R> {
    /// Fails the first `failures` renders
    pub fn new(inner: R, failures: usize) -> Self {
        Self {
            inner,
            failures_left: AtomicUsize::new(failures),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every render
    pub fn always_failing(inner: R) -> Self {
        Self::new(inner, usize::MAX)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R: DocumentRenderer> DocumentRenderer for FlakyRenderer<R> {
    async fn render(&self, document: &ReservationDocument) -> Result<RenderedArtifact, DocumentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let should_fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(DocumentError::render("simulated renderer failure"));
        }
        self.inner.render(document).await
    }
}
