//! Payment CLI commands.

use boatrent_core::rental::{PaymentDetailsInput, PaymentMethod};
use clap::{Args, Parser, Subcommand, ValueEnum};
use uuid::Uuid;

/// Payment commands.
#[derive(Debug, Parser)]
pub struct PaymentsCommand {
    #[command(subcommand)]
    pub action: PaymentsAction,
}

/// CLI payment method (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Method {
    Zelle,
    PagoMovil,
    Binance,
    Cash,
}

impl From<Method> for PaymentMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Zelle => PaymentMethod::Zelle,
            Method::PagoMovil => PaymentMethod::PagoMovil,
            Method::Binance => PaymentMethod::Binance,
            Method::Cash => PaymentMethod::Cash,
        }
    }
}

/// Method-specific fields; the server checks which ones are required.
#[derive(Debug, Args)]
pub struct DetailsArgs {
    /// Zelle sender email.
    #[arg(long)]
    pub email: Option<String>,
    /// Zelle or Pago Móvil reference.
    #[arg(long)]
    pub reference: Option<String>,
    /// Pago Móvil phone.
    #[arg(long)]
    pub phone: Option<String>,
    /// Pago Móvil 4-digit bank code.
    #[arg(long)]
    pub bank_code: Option<String>,
    /// Binance Pay transaction ID.
    #[arg(long)]
    pub transaction_id: Option<String>,
}

impl From<DetailsArgs> for PaymentDetailsInput {
    fn from(args: DetailsArgs) -> Self {
        PaymentDetailsInput {
            email: args.email,
            reference: args.reference,
            phone: args.phone,
            bank_code: args.bank_code,
            transaction_id: args.transaction_id,
        }
    }
}

/// Available payment actions.
#[derive(Debug, Subcommand)]
pub enum PaymentsAction {
    /// Pay for a booking.
    Pay {
        #[arg(long)]
        booking_id: Uuid,
        /// Amount in cents; must equal the booking total.
        #[arg(long)]
        amount: i64,
        #[arg(long, value_enum)]
        method: Method,
        #[command(flatten)]
        details: DetailsArgs,
    },
    /// Get payment by ID.
    Get { id: Uuid },
    /// List payments of a booking.
    List {
        #[arg(long)]
        booking_id: Uuid,
    },
}
