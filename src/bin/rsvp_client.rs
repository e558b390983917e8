use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use wedding_rsvp::app::RsvpForm;
use wedding_rsvp::utils::logger;
use wedding_rsvp::{Attendance, DrinkOption, GuestView, RsvpClient};

#[derive(Parser)]
#[command(name = "rsvp-client")]
#[command(about = "Look up an invitation and answer it from the command line")]
struct Args {
    /// RSVP endpoint URL
    #[arg(short, long, default_value = "http://127.0.0.1:8080/")]
    endpoint: String,

    /// Guest ID from the invitation link
    #[arg(short, long)]
    guest: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the personalized invitation
    Show,
    /// Submit an answer
    Reply {
        /// attending, with-partner or declined
        #[arg(long)]
        attendance: Attendance,

        #[arg(long, default_value = "")]
        dietary: String,

        #[arg(long, default_value = "")]
        accommodation: String,

        /// Drink key, e.g. wine_red_dry (repeatable)
        #[arg(long = "drink")]
        drinks: Vec<DrinkOption>,

        #[arg(long, default_value = "")]
        partner_dietary: String,

        #[arg(long = "partner-drink")]
        partner_drinks: Vec<DrinkOption>,
    },
}

fn print_invitation(view: &GuestView<'_>) {
    println!("{}", view.greeting());
    let label = view.invitation_type_label();
    if !label.is_empty() {
        println!("{}", label);
    }
    if let Some(message) = view.custom_message() {
        println!("\n{}", message);
    }
    if view.is_couple() {
        println!("Ждём вас {}", view.companion_phrase());
    }
    println!();
    println!("• {}", view.guest_section_title());
    if view.is_couple() {
        println!("• {}", view.partner_section_title());
    }
    if view.has_responded() {
        println!("\n✅ Ответ уже получен, его можно изменить командой reply");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let client = RsvpClient::new(args.endpoint.clone())?;
    let guest = client
        .fetch_guest(&args.guest)
        .await
        .with_context(|| format!("failed to fetch guest '{}'", args.guest))?;
    let Some(guest) = guest else {
        bail!("guest '{}' was not found", args.guest);
    };
    let view = GuestView::new(Some(&guest));

    match args.command {
        Command::Show => print_invitation(&view),
        Command::Reply {
            attendance,
            dietary,
            accommodation,
            drinks,
            partner_dietary,
            partner_drinks,
        } => {
            let mut form = RsvpForm::new();
            form.on_guest_loaded(&view);
            form.change_response();

            if attendance == Attendance::AttendingWithPartner && !view.is_couple() {
                bail!("this invitation is for one guest only");
            }
            form.attendance = Some(attendance);
            form.dietary = dietary;
            form.accommodation = if view.show_accommodation() {
                accommodation
            } else {
                String::new()
            };
            if view.show_alcohol() {
                form.drinks = drinks.into_iter().collect();
                form.toggle_no_alcohol();
                form.partner_drinks = partner_drinks.into_iter().collect();
                form.toggle_partner_no_alcohol();
            }
            form.partner_dietary = partner_dietary;

            let submission = form
                .build_submission(&view)
                .context("attendance answer is required")?;

            form.begin_submit();
            let result = client.submit(&submission).await;
            form.finish_submit(result.is_ok());
            result.context("Произошла ошибка. Попробуйте ещё раз.")?;

            println!("✅ Спасибо! Ответ сохранён для {}", view.display_name());
        }
    }

    Ok(())
}
