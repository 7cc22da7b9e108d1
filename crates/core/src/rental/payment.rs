//! Simulated payment flows.
//!
//! No money moves. Each method checks the fields a real operator would ask
//! for and settles immediately, except cash which stays pending until the
//! owner collects it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::PaymentError;
use super::requests::{PaymentDetailsInput, ProcessPaymentRequest};
use super::types::{
    Booking, BookingStatus, Payment, PaymentDetails, PaymentMethod, PaymentRecordStatus,
    PaymentStatus,
};

/// Result of a successful payment: the new record and the booking after bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcome {
    pub payment: Payment,
    pub booking: Booking,
}

fn required(value: Option<&String>, field: &'static str) -> Result<String, PaymentError> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(PaymentError::MissingDetails(field))
}

/// Builds the typed details for `method`, rejecting missing fields.
pub fn parse_payment_details(
    method: PaymentMethod,
    input: &PaymentDetailsInput,
) -> Result<PaymentDetails, PaymentError> {
    match method {
        PaymentMethod::Zelle => Ok(PaymentDetails::Zelle {
            email: required(input.email.as_ref(), "email")?,
            reference: required(input.reference.as_ref(), "reference")?,
        }),
        PaymentMethod::PagoMovil => {
            let phone = required(input.phone.as_ref(), "phone")?;
            let bank_code = required(input.bank_code.as_ref(), "bankCode")?;
            if bank_code.len() != 4 || !bank_code.chars().all(|c| c.is_ascii_digit()) {
                return Err(PaymentError::InvalidBankCode);
            }
            Ok(PaymentDetails::PagoMovil {
                phone,
                bank_code,
                reference: required(input.reference.as_ref(), "reference")?,
            })
        }
        PaymentMethod::Binance => Ok(PaymentDetails::Binance {
            transaction_id: required(input.transaction_id.as_ref(), "transactionId")?,
        }),
        PaymentMethod::Cash => Ok(PaymentDetails::Cash),
    }
}

/// Status a payment lands in for each method.
pub fn settlement_status(method: PaymentMethod) -> (PaymentRecordStatus, PaymentStatus) {
    match method {
        PaymentMethod::Cash => (PaymentRecordStatus::Pending, PaymentStatus::Pending),
        PaymentMethod::Zelle | PaymentMethod::PagoMovil | PaymentMethod::Binance => {
            (PaymentRecordStatus::Completed, PaymentStatus::Paid)
        }
    }
}

/// Validates and settles a payment against `booking`.
///
/// A completed payment on a pending booking also confirms it.
pub fn process_payment(
    booking: &Booking,
    request: &ProcessPaymentRequest,
    payer_id: Uuid,
    now: DateTime<Utc>,
) -> Result<PaymentOutcome, PaymentError> {
    if matches!(
        booking.status,
        BookingStatus::Cancelled | BookingStatus::Completed
    ) {
        return Err(PaymentError::BookingClosed);
    }
    if booking.payment_status == PaymentStatus::Paid {
        return Err(PaymentError::AlreadyPaid);
    }
    if request.amount_cents != booking.total_price_cents {
        return Err(PaymentError::AmountMismatch);
    }

    let details = parse_payment_details(request.method, &request.details)?;
    let (record_status, booking_payment_status) = settlement_status(request.method);

    let payment = Payment {
        id: Uuid::new_v4(),
        booking_id: booking.id,
        user_id: payer_id,
        amount_cents: request.amount_cents,
        status: record_status,
        details,
        created_at: now,
        updated_at: now,
    };

    let mut updated = booking.clone();
    updated.payment_status = booking_payment_status;
    if record_status == PaymentRecordStatus::Completed && updated.status == BookingStatus::Pending {
        updated.status = BookingStatus::Confirmed;
    }
    updated.updated_at = now;

    Ok(PaymentOutcome {
        payment,
        booking: updated,
    })
}
