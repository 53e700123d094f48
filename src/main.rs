use clap::Parser;

mod error;
mod filter;
mod ics;
mod info;
mod timetable;
mod utils;

#[derive(Parser)]
#[clap(version, about, long_about = None)]
struct Args {
    /// Link to the timetable page of the group
    #[clap(value_parser)]
    url: String,

    /// Your subgroup, lessons of the other subgroups are left out
    #[clap(short, long, value_parser, value_name = "SUBGROUP NUMBER")]
    subgroup: Option<u32>,

    /// Last week of the semester, the timetable doesn't tell it
    #[clap(short, long, value_parser, value_name = "WEEK NUMBER", default_value_t = 18)]
    last: u32,

    /// Export to iCalendar format (.ics)
    #[clap(short, long, value_name = "FILE NAME")]
    export: Option<String>,

    /// If the exported ICS file should not use the timezone
    #[clap(short, long)]
    no_tz: bool,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();

    if let Err(err) = run(args).await {
        log::error!("{err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> error::Result<()> {
    let user_agent = format!("nstu2ics/{}", env!("CARGO_PKG_VERSION"));

    println!("Загрузка расписания...");
    let (header, data) = timetable::timetable(&args.url, &user_agent).await?;

    let lessons = timetable::lessons(&data)?;
    let head = info::head(&header)?;

    if let Some(mut filename) = args.export {
        let subgroup = filter::subgroup(&lessons, args.subgroup)?;

        println!(
            "Группа {}, {} семестр, идёт {} неделя",
            head.group, head.semester, head.week
        );
        let weeks = info::weeks_from_now(&head, args.last)?;
        if weeks.is_empty() {
            log::warn!("No week in the semester, check --last");
        } else {
            log::info!("{} weeks in the semester", weeks.len());
        }

        // Export the calendar
        let events = timetable::build(&lessons, &weeks, subgroup);
        ics::export(&events, &head, &mut filename, !args.no_tz)?;

        println!("Файл .ICS создан => {filename}");
    } else {
        // Show the timetable
        println!("Группа {}, {} семестр", head.group, head.semester);
        timetable::display(&filter::by_subgroup(lessons, args.subgroup));
    }

    Ok(())
}
