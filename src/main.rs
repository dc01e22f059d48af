use pantry_chef::session::{NoticeKind, SelectedRecipe};
use pantry_chef::{
    create_session, ChefConfig, ChefError, DietaryRestriction, Session, SuggestionOutcome,
};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  add <ingredient>      add an ingredient to the pantry
  remove <ingredient>   remove an ingredient from the pantry
  diet <restriction>    toggle Vegetarian, Gluten-Free or Vegan
  generate              suggest recipes from the pantry
  open <number|name>    show full details for a recipe
  fav                   toggle the open recipe as a favorite
  close                 close the recipe details
  favorites             list favorite recipes
  show                  show the pantry and suggestions
  help                  show this message
  quit                  exit";

#[derive(Debug, PartialEq)]
enum Command {
    Add(String),
    Remove(String),
    Diet(DietaryRestriction),
    Generate,
    Open(String),
    Favorite,
    Close,
    Favorites,
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (line, ""),
    };

    let require_arg = |what: &str| {
        if arg.is_empty() {
            Err(format!("Usage: {} <{}>", verb, what))
        } else {
            Ok(arg.to_string())
        }
    };

    match verb.to_lowercase().as_str() {
        "add" => require_arg("ingredient").map(Command::Add),
        "remove" | "rm" => require_arg("ingredient").map(Command::Remove),
        "diet" => arg.parse().map(Command::Diet),
        "generate" | "gen" => Ok(Command::Generate),
        "open" => require_arg("number|name").map(Command::Open),
        "fav" => Ok(Command::Favorite),
        "close" => Ok(Command::Close),
        "favorites" | "favs" => Ok(Command::Favorites),
        "show" | "" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("Unknown command: {} (try 'help')", other)),
    }
}

/// Resolve `open` arguments: a 1-based suggestion number, or a name as typed
fn resolve_recipe_name(arg: &str, suggestions: &[String]) -> Option<String> {
    match arg.parse::<usize>() {
        Ok(n) => suggestions.get(n.checked_sub(1)?).cloned(),
        Err(_) => Some(arg.to_string()),
    }
}

/// Message for a generate result not already covered by a notice
fn generate_message(result: &Result<SuggestionOutcome, ChefError>) -> Option<String> {
    match result {
        Ok(SuggestionOutcome::Discarded) => Some("Request was superseded.".to_string()),
        // Failures keep the previous list and queue a notice
        Ok(_) | Err(ChefError::EmptyPantry) => None,
        Err(e) => Some(format!("Error: {}", e)),
    }
}

fn render_overview(session: &Session) {
    let state = session.state();

    if state.pantry().is_empty() {
        println!("Pantry: (empty)");
    } else {
        println!("Pantry: {}", state.pantry().join(", "));
    }

    let diets: Vec<String> = DietaryRestriction::ALL
        .iter()
        .map(|r| {
            let mark = if state.restrictions().contains(*r) { "x" } else { " " };
            format!("[{}] {}", mark, r)
        })
        .collect();
    println!("Diet:   {}", diets.join("  "));

    if state.suggestions().is_empty() {
        println!("No suggestions yet. Run 'generate'.");
    } else {
        println!("Suggestions:");
        for (i, name) in state.suggestions().iter().enumerate() {
            let star = if state.is_favorite(name) { " *" } else { "" };
            println!("  {}. {}{}", i + 1, name, star);
        }
    }
}

fn render_favorites(session: &Session) {
    let favorites = session.state().favorites();
    if favorites.is_empty() {
        println!("No favorites saved.");
        return;
    }
    for recipe in favorites.iter() {
        println!("  * {}", recipe.name);
    }
}

fn render_recipe(selected: &SelectedRecipe, is_favorite: bool) {
    let recipe = &selected.recipe;
    let star = if is_favorite { " *" } else { "" };
    println!("== {}{} ==", recipe.name, star);
    if !selected.is_resolved() {
        println!("(generating details...)");
        return;
    }
    println!("{}", recipe.description);
    println!(
        "Prep: {} | Cook: {} | Serves: {}",
        recipe.prep_time, recipe.cook_time, recipe.servings
    );
    println!("Ingredients:");
    for ingredient in &recipe.ingredients {
        println!("  - {}", ingredient);
    }
    println!("Instructions:");
    for (i, step) in recipe.instructions.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
}

fn render_dialog(session: &Session) {
    let state = session.state();
    if let Some(selected) = state.selected().filter(|_| state.is_dialog_open()) {
        render_recipe(selected, state.is_favorite(&selected.recipe.name));
    }
}

fn flush_notices(session: &mut Session) {
    for notice in session.state_mut().take_notices() {
        let prefix = match notice.kind {
            NoticeKind::Blocking => "!",
            NoticeKind::Transient => "x",
        };
        eprintln!("{} {}: {}", prefix, notice.title, notice.message);
    }
}

async fn run_command(session: &mut Session, command: Command) {
    match command {
        Command::Add(ingredient) => {
            if !session.state_mut().add_ingredient(&ingredient) {
                println!("'{}' is already in the pantry.", ingredient.trim());
            }
            render_overview(session);
        }
        Command::Remove(ingredient) => {
            if !session.state_mut().remove_ingredient(&ingredient) {
                println!("'{}' is not in the pantry.", ingredient);
            }
            render_overview(session);
        }
        Command::Diet(restriction) => {
            session.state_mut().toggle_restriction(restriction);
            render_overview(session);
        }
        Command::Generate => {
            println!("Generating suggestions...");
            let result = session.generate_suggestions().await;
            match generate_message(&result) {
                Some(message) => eprintln!("{}", message),
                None => render_overview(session),
            }
        }
        Command::Open(arg) => {
            match resolve_recipe_name(&arg, session.state().suggestions()) {
                Some(name) => {
                    if let Some(pending) = session.open_recipe(&name) {
                        render_dialog(session);
                        let completed = pending.resolve().await;
                        session.apply_details(completed);
                    }
                    render_dialog(session);
                }
                None => println!("No suggestion numbered {}.", arg),
            }
        }
        Command::Favorite => match session.state_mut().toggle_selected_favorite() {
            Some(true) => println!("Saved to favorites."),
            Some(false) => println!("Removed from favorites."),
            None => println!("Open a recipe first."),
        },
        Command::Close => session.state_mut().close_dialog(),
        Command::Favorites => render_favorites(session),
        Command::Show => {
            render_overview(session);
            render_dialog(session);
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = ChefConfig::load()?;
    let mut session = create_session(&config)?;

    println!("{}\n", HELP);
    render_overview(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => run_command(&mut session, command).await,
            Err(message) => eprintln!("{}", message),
        }
        flush_notices(&mut session);
    }

    Ok(())
}
