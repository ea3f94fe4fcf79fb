//! Document composition
//!
//! Turns a complete [`ReservationAggregate`] into a [`ReservationDocument`].
//! Derived amounts are always recomputed here; the `remaining_payment`
//! captured with the payment form is ignored.

use std::sync::Arc;
use tracing::info;

use core_kernel::{Clock, Money, RandomSource, ReservationNumber, StayPeriod};
use domain_reservation::{
    CompleteReservation, PaymentInfo, PropertyInfo, RenterInfo, ReservationAggregate, Section,
    StayInfo,
};

use crate::document::{
    Callout, DocumentSection, Field, FooterTemplate, ReservationDocument, SectionBody, SectionKind,
    Table,
};
use crate::error::DocumentError;
use crate::locale::Localizer;

/// Fluent ids of the fixed disclosure notes, in print order
const NOTE_IDS: [&str; 4] = [
    "note-check-times",
    "note-deposit-return",
    "note-cancellation",
    "note-emergency",
];

/// Builds reservation documents with injected time and randomness
pub struct DocumentComposer {
    localizer: Localizer,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl DocumentComposer {
    pub fn new(localizer: Localizer, clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            localizer,
            clock,
            random,
        }
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    /// Composes the document, or fails with `MissingData` when any section
    /// of the aggregate is still empty
    ///
    /// Records restored from storage skip validation; one that cannot be
    /// printed (check-out not after check-in, mixed currencies) fails with
    /// `InvalidSection` naming it.
    pub fn compose(
        &self,
        aggregate: &ReservationAggregate,
    ) -> Result<ReservationDocument, DocumentError> {
        let reservation = aggregate.complete()?;
        let generated_on = self.clock.today();
        let number = ReservationNumber::generate(self.clock.as_ref(), self.random.as_ref());

        let remaining_payment = reservation
            .payment
            .computed_remaining()
            .map_err(|e| DocumentError::invalid_section(Section::Payment, e))?;
        let total_due_at_check_in = reservation
            .payment
            .total_due_at_check_in()
            .map_err(|e| DocumentError::invalid_section(Section::Payment, e))?;

        let sections =
            self.sections(&reservation, &remaining_payment, &total_due_at_check_in)?;
        let l = &self.localizer;
        let header_lines = vec![
            l.text_with("reservation-number", &[("number", number.to_string())]),
            l.text_with("generated-on", &[("date", l.long_date(generated_on))]),
        ];
        let footer = FooterTemplate::new(l.text_with(
            "page-footer",
            &[
                ("page", FooterTemplate::PAGE_SLOT.to_string()),
                ("pages", FooterTemplate::PAGES_SLOT.to_string()),
                ("number", number.to_string()),
            ],
        ));

        info!(
            reservation_number = %number,
            occupants = reservation.stay.occupants.len(),
            total_due = %total_due_at_check_in,
            "Reservation document composed"
        );

        Ok(ReservationDocument {
            reservation_number: number,
            generated_on,
            title: l.text("document-title"),
            header_lines,
            sections,
            remaining_payment,
            total_due_at_check_in,
            footer,
        })
    }

    fn sections(
        &self,
        reservation: &CompleteReservation<'_>,
        remaining: &Money,
        total_due: &Money,
    ) -> Result<Vec<DocumentSection>, DocumentError> {
        let mut sections = Vec::with_capacity(SectionKind::ALL.len());
        for kind in SectionKind::ALL {
            let body = match kind {
                SectionKind::Renter => SectionBody::Fields(self.renter_fields(reservation.renter)),
                SectionKind::Property => {
                    SectionBody::Fields(self.property_fields(reservation.property))
                }
                SectionKind::Stay => SectionBody::Fields(self.stay_fields(reservation.stay)?),
                SectionKind::Occupants => SectionBody::Table(self.occupant_table(reservation.stay)),
                SectionKind::Payment => {
                    self.payment_body(reservation.payment, remaining, total_due)
                }
                SectionKind::Notes => {
                    SectionBody::Notes(NOTE_IDS.iter().map(|id| self.localizer.text(id)).collect())
                }
            };
            sections.push(DocumentSection {
                kind,
                title: self.localizer.text(kind.title_id()),
                body,
            });
        }
        Ok(sections)
    }

    fn renter_fields(&self, renter: &RenterInfo) -> Vec<Field> {
        let l = &self.localizer;
        vec![
            Field::new(l.text("renter-full-name"), &renter.full_name),
            Field::new(l.text("renter-identity"), &renter.identity_number),
            Field::new(l.text("renter-phone"), &renter.phone),
            Field::new(l.text("renter-email"), &renter.email),
            Field::new(l.text("renter-address"), l.or_empty(renter.address.as_deref())),
        ]
    }

    fn property_fields(&self, property: &PropertyInfo) -> Vec<Field> {
        let l = &self.localizer;
        vec![
            Field::new(l.text("property-name"), &property.property_name),
            Field::new(l.text("property-owner"), &property.owner_name),
            Field::new(l.text("property-phone"), &property.owner_phone),
            Field::new(l.text("property-address"), l.or_empty(property.address.as_deref())),
        ]
    }

    fn stay_fields(&self, stay: &StayInfo) -> Result<Vec<Field>, DocumentError> {
        let l = &self.localizer;
        let period = StayPeriod::new(stay.check_in, stay.check_out)
            .map_err(|e| DocumentError::invalid_section(Section::Stay, e))?;
        Ok(vec![
            Field::new(l.text("stay-check-in"), l.long_date(period.check_in())),
            Field::new(l.text("stay-check-out"), l.long_date(period.check_out())),
            Field::new(l.text("stay-nights"), period.nights().to_string()),
            Field::new(l.text("stay-guests"), stay.guest_count.to_string()),
        ])
    }

    fn occupant_table(&self, stay: &StayInfo) -> Table {
        let l = &self.localizer;
        let headers = ["occupant-sequence", "occupant-name", "occupant-id", "occupant-category"]
            .iter()
            .map(|id| l.text(id))
            .collect();
        let rows = stay
            .occupants
            .iter()
            .enumerate()
            .map(|(i, occupant)| {
                vec![
                    (i + 1).to_string(),
                    occupant.full_name.clone(),
                    occupant.national_id.clone(),
                    l.category(occupant.category),
                ]
            })
            .collect();
        Table { headers, rows }
    }

    fn payment_body(
        &self,
        payment: &PaymentInfo,
        remaining: &Money,
        total_due: &Money,
    ) -> SectionBody {
        let l = &self.localizer;

        let mut fields = vec![
            Field::new(l.text("payment-total"), l.money(&payment.total_amount)),
            Field::new(l.text("payment-upfront"), l.money(&payment.upfront_payment)),
            Field::new(l.text("payment-remaining"), l.money(remaining)),
            Field::new(l.text("payment-deposit"), l.money(&payment.damage_deposit)),
            Field::new(l.text("payment-date"), l.long_date(payment.payment_date)),
            Field::new(l.text("payment-method"), l.payment_method(payment.payment_method)),
        ];
        if let Some(note) = payment.note.as_deref() {
            fields.push(Field::new(l.text("payment-note"), note));
        }

        SectionBody::Payment {
            fields,
            callout: Callout {
                label: l.text("total-due-at-check-in"),
                value: l.money(total_due),
            },
        }
    }
}

impl std::fmt::Debug for DocumentComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentComposer")
            .field("localizer", &self.localizer)
            .finish()
    }
}
