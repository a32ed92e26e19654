use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use nosh::api::{CmdMessage, DisplayMeal, MessageLevel, NoshApi};
use nosh::commands::export::default_filename;
use nosh::commands::stats::WeekStats;
use nosh::error::{NoshError, Result};
use nosh::model::FoodItem;
use nosh::store::fs::FileStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: NoshApi<FileStore>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { name }) => handle_add(&mut ctx, &name),
        Some(Commands::Foods) => handle_foods(&ctx),
        Some(Commands::Rename { food, name }) => handle_rename(&mut ctx, &food, &name),
        Some(Commands::Remove { food }) => handle_remove(&mut ctx, &food),
        Some(Commands::Log { items, at }) => handle_log(&mut ctx, items, at),
        Some(Commands::History { limit }) => handle_history(&ctx, limit),
        Some(Commands::Edit { meal, items, at }) => handle_edit(&mut ctx, &meal, items, at),
        Some(Commands::Unlog { meal }) => handle_unlog(&mut ctx, &meal),
        Some(Commands::Stats) => handle_stats(&ctx),
        Some(Commands::Export { path }) => handle_export(&ctx, path),
        Some(Commands::Import { path }) => handle_import(&mut ctx, &path),
        None => handle_history(&ctx, None),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "nosh", "nosh")
            .ok_or_else(|| NoshError::Api("Could not determine data dir".to_string()))?
            .data_dir()
            .to_path_buf(),
    };

    let api = NoshApi::new(FileStore::new(data_dir));
    Ok(AppContext { api })
}

fn handle_add(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx.api.add_food(name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_foods(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_foods()?;
    print_foods(&result.foods);
    print_messages(&result.messages);
    Ok(())
}

fn handle_rename(ctx: &mut AppContext, food: &str, name: &str) -> Result<()> {
    let result = ctx.api.rename_food(food, name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(ctx: &mut AppContext, food: &str) -> Result<()> {
    let result = ctx.api.delete_food(food)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_log(ctx: &mut AppContext, items: Vec<String>, at: Option<String>) -> Result<()> {
    let at = parse_timestamp_arg(at.as_deref())?;
    let result = ctx.api.log_meal(&items, at)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_history(ctx: &AppContext, limit: Option<usize>) -> Result<()> {
    let result = ctx.api.list_meals(limit)?;
    print_meals(&result.meals);
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    meal: &str,
    items: Vec<String>,
    at: Option<String>,
) -> Result<()> {
    let at = parse_timestamp_arg(at.as_deref())?;
    // No items on the command line means "keep the current ones".
    let items = if items.is_empty() {
        None
    } else {
        Some(items.as_slice())
    };
    let result = ctx.api.update_meal(meal, items, at)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_unlog(ctx: &mut AppContext, meal: &str) -> Result<()> {
    let result = ctx.api.delete_meal(meal)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stats()?;
    if let Some(stats) = &result.stats {
        print_stats(stats);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, path: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export()?;
    if let Some(text) = &result.export {
        let path = path.unwrap_or_else(|| PathBuf::from(default_filename(Local::now())));
        std::fs::write(&path, text)?;
        println!("Backup written to {}", path.display());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: &PathBuf) -> Result<()> {
    let text = std::fs::read_to_string(path)?;
    let result = ctx.api.import(&text)?;
    print_messages(&result.messages);
    Ok(())
}

fn parse_timestamp_arg(at: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match at {
        None => Ok(None),
        Some(s) => parse_timestamp(s).map(Some),
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        if let Some(dt) = Local.from_local_datetime(&naive).single() {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    Err(NoshError::Api(format!(
        "Unrecognized time '{}' (use RFC 3339 or \"YYYY-MM-DD HH:MM\")",
        s
    )))
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 72;
const TIME_WIDTH: usize = 14;

fn print_foods(foods: &[FoodItem]) {
    if foods.is_empty() {
        println!("No foods in the library.");
        return;
    }

    for (i, food) in foods.iter().enumerate() {
        let idx_str = format!("{:>3}. ", i + 1);
        let available = LINE_WIDTH.saturating_sub(idx_str.width() + TIME_WIDTH);
        let name = truncate_to_width(&food.name, available);
        let padding = available.saturating_sub(name.width());

        println!(
            "{}{}{}{}",
            idx_str,
            name,
            " ".repeat(padding),
            format_time_ago(food.created_at).dimmed()
        );
    }
}

fn print_meals(meals: &[DisplayMeal]) {
    if meals.is_empty() {
        println!("No meals logged.");
        return;
    }

    for (i, meal) in meals.iter().enumerate() {
        let idx_str = format!("{:>3}. ", i + 1);
        let available = LINE_WIDTH.saturating_sub(idx_str.width() + TIME_WIDTH);
        let names = truncate_to_width(&meal.names.join(", "), available);
        let padding = available.saturating_sub(names.width());

        println!(
            "{}{}{}{}",
            idx_str,
            names,
            " ".repeat(padding),
            format_time_ago(meal.entry.timestamp).dimmed()
        );
    }
}

fn print_stats(stats: &WeekStats) {
    println!("{}", "Last 7 days".bold());
    for day in &stats.days {
        let line = format!(
            "{}  morning {:>2}  afternoon {:>2}  evening {:>2}  night {:>2}",
            day.date.format("%a %b %d"),
            day.morning,
            day.afternoon,
            day.evening,
            day.night
        );
        if day.total() == 0 {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }

    if !stats.top_foods.is_empty() {
        println!();
        println!("{}", "Most logged".bold());
        for (i, food) in stats.top_foods.iter().enumerate() {
            println!("{:>3}. {} ({})", i + 1, food.name, food.count);
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
