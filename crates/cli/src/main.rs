use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use sakhi_core::validation::{ChildDraft, MotherDraft};
use sakhi_core::{clinical, collections, temporal};
use sakhi_store::{Registry, Session, StoreError};
use sakhi_types::{Gender, RiskLevel};

#[derive(Parser)]
#[command(name = "sakhi")]
#[command(about = "Sakhi maternal and child health records CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all mothers
    ListMothers,
    /// List all children
    ListChildren,
    /// List visits, most recent scheduled date first
    ListVisits,
    /// Print today's visits in route order (priority ascending)
    RoutePlan,
    /// Print the dashboard counters
    Dashboard,
    /// Register a mother
    RegisterMother {
        /// Full name
        name: String,
        /// Age in years (15-50)
        age: u32,
        /// 10-digit phone number
        phone: String,
        /// Home address
        address: String,
        /// Current pregnancy week (0-42)
        #[arg(long)]
        pregnancy_week: u32,
        /// Risk level (low, medium, high)
        #[arg(long)]
        risk_level: Option<RiskLevel>,
        /// Last menstrual period (YYYY-MM-DD)
        #[arg(long)]
        lmp: Option<NaiveDate>,
    },
    /// Register a child under an existing mother
    RegisterChild {
        /// Child's name
        name: String,
        /// Date of birth (YYYY-MM-DD)
        date_of_birth: NaiveDate,
        /// Mother record id
        mother_id: String,
        /// Gender (male, female)
        #[arg(long)]
        gender: Option<Gender>,
        /// Birth weight in kg (0.5-10)
        #[arg(long)]
        birth_weight: Option<f64>,
    },
    /// Compute the expected delivery date from an LMP date
    Edd {
        /// Last menstrual period (YYYY-MM-DD)
        lmp: NaiveDate,
    },
    /// Compute BMI from weight and height
    Bmi {
        /// Weight in kg
        weight_kg: f64,
        /// Height in cm
        height_cm: f64,
    },
    /// Print the vaccination schedule for a child's age
    Schedule {
        /// Age in months
        age_months: u32,
    },
}

fn print_store_error(err: StoreError) {
    match err {
        StoreError::Validation { errors, .. } => {
            eprintln!("Registration rejected:");
            for (field, message) in errors {
                eprintln!("  {}: {}", field, message);
            }
        }
        other => eprintln!("Error: {}", other),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Every invocation runs against a freshly seeded registry; there is no
    // durable persistence in this system.
    let registry = Registry::seeded(Utc::now());
    let session = Session::asha("ASHA Worker");

    match cli.command {
        Some(Commands::ListMothers) => {
            for mother in registry.list_mothers(&session).await {
                println!(
                    "ID: {}, Name: {}, Age: {}, Risk: {}, EDD: {}",
                    mother.id,
                    mother.name,
                    mother.age,
                    mother.risk_level,
                    temporal::display_date_opt(mother.edd)
                );
            }
        }
        Some(Commands::ListChildren) => {
            let today = Utc::now().date_naive();
            for child in registry.list_children(&session).await {
                println!(
                    "ID: {}, Name: {}, Age: {}, Mother: {}, Vaccination: {}",
                    child.id,
                    child.name,
                    temporal::age_breakdown(child.date_of_birth, today),
                    child.mother_name,
                    child.vaccination_status.label()
                );
            }
        }
        Some(Commands::ListVisits) => {
            let visits = collections::sort_visits(registry.list_visits(&session).await);
            for visit in visits {
                println!(
                    "{} | {} ({}) | {} | priority {} | {}",
                    temporal::display_date(visit.scheduled_date.date_naive()),
                    visit.patient_name,
                    visit.patient_kind,
                    visit.status.label(),
                    visit.priority,
                    visit.address
                );
            }
        }
        Some(Commands::RoutePlan) => {
            let visits = collections::route_plan(registry.list_visits(&session).await);
            if visits.is_empty() {
                println!("No visits planned.");
            }
            for (stop, visit) in visits.iter().enumerate() {
                println!(
                    "Stop {}: {} - {} (priority {}, {})",
                    stop + 1,
                    visit.patient_name,
                    visit.address,
                    visit.priority,
                    collections::route_priority_bucket(visit.priority).label()
                );
            }
        }
        Some(Commands::Dashboard) => {
            let stats = registry.dashboard_stats(&session, Utc::now()).await;
            println!("Today's visits: {}", stats.today_visits);
            println!("  completed: {}", stats.completed_visits);
            println!("  pending: {}", stats.pending_visits);
            println!("High risk cases: {}", stats.high_risk_cases);
            println!("Mothers: {}", stats.total_mothers);
            println!("Children: {}", stats.total_children);
        }
        Some(Commands::RegisterMother {
            name,
            age,
            phone,
            address,
            pregnancy_week,
            risk_level,
            lmp,
        }) => {
            let draft = MotherDraft {
                name,
                age: Some(age),
                phone,
                address,
                pregnancy_week: Some(pregnancy_week),
                risk_level: risk_level.unwrap_or_default(),
                lmp,
                last_visit: None,
            };
            match registry.register_mother(draft).await {
                Ok(mother) => println!("Registered mother with ID: {}", mother.id),
                Err(err) => print_store_error(err),
            }
        }
        Some(Commands::RegisterChild {
            name,
            date_of_birth,
            mother_id,
            gender,
            birth_weight,
        }) => {
            let draft = ChildDraft {
                name,
                date_of_birth: Some(date_of_birth),
                gender: gender.unwrap_or(Gender::Male),
                mother_id,
                birth_weight,
                risk_level: RiskLevel::Low,
            };
            match registry.register_child(draft, Utc::now()).await {
                Ok(child) => println!(
                    "Registered child with ID: {} ({})",
                    child.id,
                    temporal::age_breakdown(child.date_of_birth, Utc::now().date_naive())
                ),
                Err(err) => print_store_error(err),
            }
        }
        Some(Commands::Edd { lmp }) => {
            println!(
                "Expected delivery date: {}",
                temporal::display_date(temporal::estimated_delivery_date(lmp))
            );
        }
        Some(Commands::Bmi {
            weight_kg,
            height_cm,
        }) => match clinical::bmi(Some(weight_kg), Some(height_cm)) {
            Some(value) => println!(
                "BMI: {} ({})",
                value,
                clinical::BmiCategory::from_bmi(value).label()
            ),
            None => println!("BMI unavailable: weight and height must be positive."),
        },
        Some(Commands::Schedule { age_months }) => {
            let schedule = clinical::vaccination_schedule(age_months);
            if schedule.is_empty() {
                println!("No vaccinations due at {} months.", age_months);
            }
            for vaccine in schedule {
                println!("{} - {}", vaccine.name, vaccine.status.label());
            }
        }
        None => {
            println!("sakhi: use --help to list commands");
        }
    }
}
