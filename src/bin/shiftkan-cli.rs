#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::Datelike;
use shiftkan::{
    calendar, io,
    model::{Project, Schedule, ShiftKind, WorkerId},
    scheduler::{AssignOptions, ConflictKind, Scheduler, TieBreak},
    storage::{JsonStorage, Storage},
};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération de plannings jour/nuit
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du projet (roster, effectifs, prioritaires)
    #[arg(long, global = true, default_value = "shiftkan.json")]
    project: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Remplacer le roster depuis un CSV `ID,Name,Date[,Priority]`
    Import {
        #[arg(long)]
        csv: String,
    },

    /// Modifier puis afficher la politique d'effectifs
    Policy {
        #[arg(long)]
        weekday_day: Option<u32>,
        #[arg(long)]
        weekday_night: Option<u32>,
        #[arg(long)]
        weekend_day: Option<u32>,
        #[arg(long)]
        weekend_night: Option<u32>,
        /// Jours fériés "YYYY-MM-DD,YYYY-MM-DD" (remplace la liste)
        #[arg(long)]
        holidays: Option<String>,
        #[arg(long)]
        holidays_as_weekends: Option<bool>,
    },

    /// Gérer les membres dont les souhaits sont toujours prioritaires
    Priority {
        #[arg(long)]
        add: Vec<String>,
        #[arg(long)]
        remove: Vec<String>,
    },

    /// Générer le planning d'un mois
    Generate {
        /// YYYY-MM (par défaut : mois courant)
        #[arg(long)]
        month: Option<String>,
        /// Départage pseudo-aléatoire reproductible (sinon par ID)
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out_tsv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Vérifier un planning JSON contre le projet
    Check {
        #[arg(long)]
        schedule: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let storage = JsonStorage::open(&cli.project)?;
    let mut project = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::Import { csv } => {
            project.workers = io::import_requests_csv(&csv)?;
            let requests: usize = project.workers.iter().map(|w| w.requests.len()).sum();
            storage.save(&project)?;
            println!(
                "Imported {} worker(s), {} request(s)",
                project.workers.len(),
                requests
            );
            0
        }
        Commands::Policy {
            weekday_day,
            weekday_night,
            weekend_day,
            weekend_night,
            holidays,
            holidays_as_weekends,
        } => {
            let policy = &mut project.policy;
            if let Some(n) = weekday_day {
                policy.weekday_day = n;
            }
            if let Some(n) = weekday_night {
                policy.weekday_night = n;
            }
            if let Some(n) = weekend_day {
                policy.weekend_day = n;
            }
            if let Some(n) = weekend_night {
                policy.weekend_night = n;
            }
            if let Some(raw) = holidays {
                policy.public_holidays = calendar::parse_public_holidays(&raw).into_iter().collect();
            }
            if let Some(flag) = holidays_as_weekends {
                policy.treat_public_holidays_as_weekends = flag;
            }
            storage.save(&project)?;
            print_policy(&project);
            0
        }
        Commands::Priority { add, remove } => {
            for raw in add {
                let id = WorkerId::new(raw.trim());
                if project.find_worker(&id).is_none() {
                    bail!("unknown worker id: {id}");
                }
                project.priority.insert(id);
            }
            for raw in remove {
                project.priority.remove(&WorkerId::new(raw.trim()));
            }
            storage.save(&project)?;
            for id in project.priority.iter() {
                println!("{id}");
            }
            0
        }
        Commands::Generate {
            month,
            seed,
            out_tsv,
            out_json,
        } => {
            let (year, month) = match month {
                Some(raw) => calendar::parse_month(&raw)
                    .with_context(|| format!("invalid month {raw:?}, expected YYYY-MM"))?,
                None => {
                    let today = chrono::Local::now().date_naive();
                    (today.year(), today.month())
                }
            };
            let opts = AssignOptions {
                tie_break: seed.map_or(TieBreak::ById, |seed| TieBreak::Shuffled { seed }),
            };
            let scheduler = Scheduler::from_project(project);
            let schedule = scheduler.generate(year, month, opts)?;

            if let Some(path) = out_tsv {
                io::export_schedule_tsv(path, &schedule, scheduler.workers())?;
            }
            if let Some(path) = out_json {
                io::export_schedule_json(path, &schedule)?;
            }
            print_grid(&schedule, &scheduler);

            if schedule.warnings.is_empty() {
                0
            } else {
                eprintln!("Found {} staffing warning(s)", schedule.warnings.len());
                for w in &schedule.warnings {
                    eprintln!("  {w}");
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Check { schedule } => {
            let schedule = io::load_schedule_json(schedule)?;
            let scheduler = Scheduler::from_project(project);
            let conflicts = scheduler.detect_conflicts(&schedule);
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                for c in &conflicts {
                    let kind = match c.kind {
                        ConflictKind::Unassigned => "unassigned",
                        ConflictKind::DoubleAssignment => "double",
                        ConflictKind::RestViolation => "rest",
                        ConflictKind::PriorityIgnored => "priority",
                    };
                    println!("{} | {} | {}", c.date, c.worker, kind);
                }
                2
            }
        }
    };

    std::process::exit(code);
}

fn print_policy(project: &Project) {
    let p = &project.policy;
    println!("weekday: day {} / night {}", p.weekday_day, p.weekday_night);
    println!("weekend: day {} / night {}", p.weekend_day, p.weekend_night);
    println!("holidays as weekends: {}", p.treat_public_holidays_as_weekends);
    let holidays: Vec<String> = p.public_holidays.iter().map(|d| d.to_string()).collect();
    println!("holidays: {}", holidays.join(","));
}

// impression compacte : D jour, N nuit, R repos demandé, . repos ordinaire
fn print_grid(schedule: &Schedule, scheduler: &Scheduler) {
    let width = scheduler
        .workers()
        .iter()
        .map(|w| w.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("YYYY-MM".len());
    let marks: String = schedule
        .days
        .keys()
        .map(|d| {
            if scheduler.policy().is_public_holiday(*d) {
                'H'
            } else if calendar::day_of_week(*d).is_weekend() {
                'W'
            } else {
                ' '
            }
        })
        .collect();
    println!("{:width$} | {}", format!("{}-{:02}", schedule.year, schedule.month), marks);
    for worker in scheduler.workers() {
        let cells: String = schedule
            .row(&worker.id)
            .iter()
            .map(|k| match k {
                ShiftKind::Day => 'D',
                ShiftKind::Night => 'N',
                ShiftKind::RequestedOff => 'R',
                ShiftKind::PublicOff => '.',
            })
            .collect();
        let t = schedule.tally(&worker.id);
        println!(
            "{:width$} | {} | D{} N{} R{} O{}",
            worker.name, cells, t.day, t.night, t.requested_off, t.public_off
        );
    }
}
