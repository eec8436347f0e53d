use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use schoolhub_cli::seeder::{self, SeedConfig};
use schoolhub_config::DatabaseConfig;
use schoolhub_db::{PgPool, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "schoolhub-cli")]
#[command(about = "SchoolHub CLI - migrations and demo data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Seed students with grades, attendance and sample grading scales
    Seed {
        /// Number of students to create
        #[arg(short = 's', long, default_value = "50")]
        students: usize,

        /// Assessments per student per subject
        #[arg(short = 'g', long, default_value = "6")]
        grades: usize,

        /// School days of attendance per student
        #[arg(short = 'd', long, default_value = "60")]
        days: usize,

        /// Comma-separated subjects (defaults to a standard set)
        #[arg(long, value_delimiter = ',')]
        subjects: Vec<String>,
    },
    /// Delete seeded students (cascades to their grades and attendance)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = match connect().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::Seed {
            students,
            grades,
            days,
            subjects,
        } => handle_seed(&pool, students, grades, days, subjects).await,
        Commands::ClearSeed => seeder::clear_all(&pool).await.map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&config).await?;
    Ok(pool)
}

async fn handle_migrate(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    run_migrations(pool).await?;
    println!("✅ Migrations applied");
    Ok(())
}

async fn handle_seed(
    pool: &PgPool,
    students: usize,
    grades: usize,
    days: usize,
    subjects: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = SeedConfig::new(students)
        .with_grades_per_subject(grades)
        .with_attendance_days(days);

    let subjects: Vec<String> = subjects
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if !subjects.is_empty() {
        config.subjects = subjects;
    }

    seeder::seed_all(pool, config).await
}
