//! boatrent-client CLI entry point.

use boatrent_client::cli::{Cli, Commands, OutputFormat};
use boatrent_client::client::BoatrentClient;
use boatrent_client::output::{format_output, pretty};
use boatrent_client::client::health::StorageHealth;
use boatrent_core::auth::{AuthResponse, RegisterRequest, TokenPair};
use boatrent_core::rental::{
    Boat, BoatSearch, Booking, CreateBoatRequest, CreateBookingRequest, CreateReservationRequest,
    CreateReviewRequest, Notification, Payment, ProcessPaymentRequest, Review, UpdateBoatRequest,
};
use clap::Parser;

/// Print `value` as JSON or with the given pretty formatter.
macro_rules! emit {
    ($format:expr, $value:expr, $pretty:expr) => {
        match $format {
            OutputFormat::Json => println!("{}", format_output(&$value, $format)),
            OutputFormat::Pretty => {
                let render = $pretty;
                println!("{}", render(&$value));
            }
        }
    };
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut client = BoatrentClient::new(&cli.base_url);
    if let Some(token) = &cli.token {
        client = client.with_token(token);
    }

    match cli.command {
        Commands::Auth(auth_cmd) => {
            use boatrent_client::cli::auth::AuthAction;
            match auth_cmd.action {
                AuthAction::Register {
                    email,
                    password,
                    name,
                    phone,
                    role,
                } => {
                    let mut request =
                        RegisterRequest::new(email, password, name).with_role(role.into());
                    request.phone = phone;
                    let auth = client.register(&request).await?;
                    emit!(cli.format, auth, |a: &AuthResponse| {
                        format!(
                            "Registered:\n{}\n\nToken: {}\nRefresh token: {}",
                            pretty::format_user(&a.user),
                            a.token,
                            a.refresh_token
                        )
                    });
                }
                AuthAction::Login { email, password } => {
                    let auth = client.login(&email, &password).await?;
                    emit!(cli.format, auth, |a: &AuthResponse| {
                        format!(
                            "{}\n\nToken: {}\nRefresh token: {}",
                            pretty::format_user(&a.user),
                            a.token,
                            a.refresh_token
                        )
                    });
                }
                AuthAction::Refresh { refresh_token } => {
                    let tokens = client.refresh(&refresh_token).await?;
                    emit!(cli.format, tokens, |t: &TokenPair| {
                        format!("Token: {}\nRefresh token: {}", t.token, t.refresh_token)
                    });
                }
                AuthAction::Me => {
                    let user = client.me().await?;
                    emit!(cli.format, user, pretty::format_user);
                }
            }
        }
        Commands::Boats(boats_cmd) => {
            use boatrent_client::cli::boats::BoatsAction;
            match boats_cmd.action {
                BoatsAction::List { owner_id } => {
                    let boats = client.list_boats(owner_id).await?;
                    emit!(cli.format, boats, |b: &Vec<Boat>| pretty::format_boats(b));
                }
                BoatsAction::Search {
                    q,
                    location,
                    boat_type,
                    min_capacity,
                    max_price,
                    start,
                    end,
                } => {
                    let search = BoatSearch {
                        q,
                        location,
                        boat_type: boat_type.map(Into::into),
                        min_capacity,
                        max_price,
                        available_only: false,
                        start_date: start,
                        end_date: end,
                    };
                    let boats = client.search_boats(&search).await?;
                    emit!(cli.format, boats, |b: &Vec<Boat>| pretty::format_boats(b));
                }
                BoatsAction::Get { id } => {
                    let boat = client.get_boat(id).await?;
                    emit!(cli.format, boat, pretty::format_boat);
                }
                BoatsAction::Create {
                    name,
                    boat_type,
                    location,
                    capacity,
                    price,
                    description,
                } => {
                    let mut request =
                        CreateBoatRequest::new(name, boat_type.into(), location, capacity, price);
                    request.description = description;
                    let boat = client.create_boat(&request).await?;
                    emit!(cli.format, boat, |b: &Boat| format!(
                        "Created:\n{}",
                        pretty::format_boat(b)
                    ));
                }
                BoatsAction::Update {
                    id,
                    price,
                    available,
                } => {
                    let mut request = UpdateBoatRequest::new();
                    request.price_per_day_cents = price;
                    request.available = available;
                    let boat = client.update_boat(id, &request).await?;
                    emit!(cli.format, boat, |b: &Boat| format!(
                        "Updated:\n{}",
                        pretty::format_boat(b)
                    ));
                }
                BoatsAction::Delete { id } => {
                    client.delete_boat(id).await?;
                    if !cli.quiet {
                        println!("Deleted boat {}", id);
                    }
                }
                BoatsAction::Availability { id, start, end } => {
                    let availability = client.check_availability(id, start, end).await?;
                    emit!(cli.format, availability, pretty::format_availability);
                }
                BoatsAction::Reviews { id } => {
                    let reviews = client.list_reviews(id).await?;
                    emit!(cli.format, reviews, |r: &Vec<Review>| pretty::format_reviews(r));
                }
                BoatsAction::Review {
                    id,
                    rating,
                    comment,
                } => {
                    let review = client
                        .create_review(id, &CreateReviewRequest { rating, comment })
                        .await?;
                    emit!(cli.format, review, |r: &Review| format!(
                        "Reviewed:\n{}",
                        pretty::format_review(r)
                    ));
                }
            }
        }
        Commands::Bookings(bookings_cmd) => {
            use boatrent_client::cli::bookings::BookingsAction;
            match bookings_cmd.action {
                BookingsAction::List { user_id } => {
                    let bookings = client.list_bookings(user_id).await?;
                    emit!(cli.format, bookings, |b: &Vec<Booking>| pretty::format_bookings(b));
                }
                BookingsAction::Get { id } => {
                    let booking = client.get_booking(id).await?;
                    emit!(cli.format, booking, pretty::format_booking);
                }
                BookingsAction::Create {
                    boat_id,
                    start,
                    end,
                    guests,
                    notes,
                } => {
                    let mut request = CreateBookingRequest::new(boat_id, start, end, guests);
                    request.notes = notes;
                    let booking = client.create_booking(&request).await?;
                    emit!(cli.format, booking, |b: &Booking| format!(
                        "Booked:\n{}",
                        pretty::format_booking(b)
                    ));
                }
                BookingsAction::Status { id, status, reason } => {
                    let booking = client
                        .update_booking_status(id, status.into(), reason)
                        .await?;
                    emit!(cli.format, booking, pretty::format_booking);
                }
                BookingsAction::Cancel { id, reason } => {
                    let booking = client.cancel_booking(id, reason).await?;
                    emit!(cli.format, booking, |b: &Booking| format!(
                        "Cancelled:\n{}",
                        pretty::format_booking(b)
                    ));
                }
            }
        }
        Commands::Reservations(reservations_cmd) => {
            use boatrent_client::cli::reservations::ReservationsAction;
            match reservations_cmd.action {
                ReservationsAction::Hold {
                    boat_id,
                    start,
                    end,
                    guests,
                } => {
                    let request = CreateReservationRequest {
                        boat_id,
                        start_date: start,
                        end_date: end,
                        guests,
                    };
                    let hold = client.create_reservation(&request).await?;
                    emit!(cli.format, hold, pretty::format_reservation);
                }
                ReservationsAction::Confirm { id, notes } => {
                    let booking = client.confirm_reservation(id, notes).await?;
                    emit!(cli.format, booking, |b: &Booking| format!(
                        "Booked:\n{}",
                        pretty::format_booking(b)
                    ));
                }
                ReservationsAction::Release { id } => {
                    client.release_reservation(id).await?;
                    if !cli.quiet {
                        println!("Released hold {}", id);
                    }
                }
            }
        }
        Commands::Notifications(notifications_cmd) => {
            use boatrent_client::cli::notifications::NotificationsAction;
            match notifications_cmd.action {
                NotificationsAction::List { unread } => {
                    let mut notifications = client.list_notifications().await?;
                    if unread {
                        notifications.retain(|n| !n.read);
                    }
                    emit!(cli.format, notifications, |n: &Vec<Notification>| {
                        pretty::format_notifications(n)
                    });
                }
                NotificationsAction::Read { id } => {
                    let notification = client.mark_notification_read(id).await?;
                    emit!(cli.format, notification, pretty::format_notification);
                }
            }
        }
        Commands::Payments(payments_cmd) => {
            use boatrent_client::cli::payments::PaymentsAction;
            match payments_cmd.action {
                PaymentsAction::Pay {
                    booking_id,
                    amount,
                    method,
                    details,
                } => {
                    let request = ProcessPaymentRequest {
                        booking_id,
                        amount_cents: amount,
                        method: method.into(),
                        details: details.into(),
                    };
                    let outcome = client.process_payment(&request).await?;
                    emit!(cli.format, outcome, pretty::format_outcome);
                }
                PaymentsAction::Get { id } => {
                    let payment = client.get_payment(id).await?;
                    emit!(cli.format, payment, pretty::format_payment);
                }
                PaymentsAction::List { booking_id } => {
                    let payments = client.list_booking_payments(booking_id).await?;
                    emit!(cli.format, payments, |p: &Vec<Payment>| pretty::format_payments(p));
                }
            }
        }
        Commands::Health(health_cmd) => {
            use boatrent_client::cli::health::HealthAction;
            match health_cmd.action {
                HealthAction::Live => {
                    client.livez().await?;
                    if !cli.quiet {
                        println!("OK");
                    }
                }
                HealthAction::Storage => {
                    let health = client.healthz().await?;
                    emit!(cli.format, health, |h: &StorageHealth| {
                        format!("Storage: {}", h.status)
                    });
                }
            }
        }
    }

    Ok(())
}
