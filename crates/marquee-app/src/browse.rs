//! Interactive home page session.
//!
//! Typed commands drive the same controllers a pointer would; the hero
//! rotation timer runs alongside stdin until user navigation latches it off.

use std::cell::RefCell;
use std::str::FromStr;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use marquee_api::traits::CatalogSource;
use marquee_core::carousel::{Autoplay, Carousel};
use marquee_core::config::AppConfig;
use marquee_core::error::MarqueeError;
use marquee_core::home::{load_home, HomePage};
use marquee_core::modal::{open_details, play_title, CloseReason, DetailsModal};
use marquee_core::player::PlayerEvent;
use marquee_core::scroll_row::ScrollRow;
use marquee_core::search::{dispatch, SearchController};

use crate::console::{self, ConsoleFactory, ConsolePlayer};

const HELP: &str = "\
commands:
  next | prev | jump N       move the featured slides
  mute                       toggle trailer sound
  info | watch               details / trailer of the featured title
  open R C | play R C        details / trailer of a row card
  trailer                    play the trailer in the open details
  close [button|backdrop|esc]
  left R | right R           scroll a row
  hover R C | leave R C      move the pointer over a card
  resize WIDTH               change the viewport width
  find TEXT | pick N | dismiss
  show | rows | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Next,
    Prev,
    Jump(isize),
    Mute,
    Info,
    Watch,
    Open { row: usize, col: usize },
    Play { row: usize, col: usize },
    Trailer,
    Close(CloseReason),
    Left(usize),
    Right(usize),
    Hover { row: usize, col: usize },
    Leave { row: usize, col: usize },
    Resize(f32),
    Find(String),
    Pick(usize),
    Dismiss,
    Show,
    Rows,
    Help,
    Quit,
}

fn number<T: FromStr>(arg: &str) -> Result<T, String> {
    arg.parse()
        .map_err(|_| format!("expected a number, got `{arg}`"))
}

fn width(arg: &str) -> Result<f32, String> {
    let value: f32 = number(arg)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("width must be a non-negative number, got `{arg}`"))
    }
}

fn pair(arg: &str) -> Result<(usize, usize), String> {
    let mut parts = arg.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(row), Some(col), None) => Ok((number(row)?, number(col)?)),
        _ => Err(format!("expected ROW COL, got `{arg}`")),
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, arg) = line
            .split_once(char::is_whitespace)
            .map(|(w, a)| (w, a.trim()))
            .unwrap_or((line, ""));

        let command = match word {
            "next" | "n" => Self::Next,
            "prev" | "p" => Self::Prev,
            "jump" => Self::Jump(number(arg)?),
            "mute" | "m" => Self::Mute,
            "info" => Self::Info,
            "watch" => Self::Watch,
            "open" => {
                let (row, col) = pair(arg)?;
                Self::Open { row, col }
            }
            "play" => {
                let (row, col) = pair(arg)?;
                Self::Play { row, col }
            }
            "trailer" => Self::Trailer,
            "close" => Self::Close(match arg {
                "" | "button" => CloseReason::Button,
                "backdrop" => CloseReason::Backdrop,
                "esc" | "escape" => CloseReason::Escape,
                other => return Err(format!("unknown close reason `{other}`")),
            }),
            "left" => Self::Left(number(arg)?),
            "right" => Self::Right(number(arg)?),
            "hover" => {
                let (row, col) = pair(arg)?;
                Self::Hover { row, col }
            }
            "leave" => {
                let (row, col) = pair(arg)?;
                Self::Leave { row, col }
            }
            "resize" => Self::Resize(width(arg)?),
            "find" => Self::Find(arg.to_string()),
            "pick" => Self::Pick(number(arg)?),
            "dismiss" => Self::Dismiss,
            "show" => Self::Show,
            "rows" => Self::Rows,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => return Err(format!("unknown command `{other}`, try `help`")),
        };
        Ok(command)
    }
}

pub struct Browser<'a, C: CatalogSource> {
    catalog: &'a C,
    image_base: &'a str,
    home: HomePage<ConsolePlayer>,
    modal: DetailsModal<ConsoleFactory>,
    search: RefCell<SearchController>,
}

impl<'a, C: CatalogSource> Browser<'a, C> {
    pub fn new(catalog: &'a C, config: &'a AppConfig, home: HomePage<ConsolePlayer>) -> Self {
        Self {
            catalog,
            image_base: &config.api.image_base_url,
            home,
            modal: DetailsModal::new(ConsoleFactory::new("modal")),
            search: RefCell::new(SearchController::new(config.search_debounce())),
        }
    }

    /// Console players are ready as soon as they exist.
    fn start_trailers(&mut self) {
        if let Some(hero) = self.home.hero.as_mut() {
            for index in 0..hero.len() {
                hero.on_player_event(index, PlayerEvent::Ready);
            }
        }
    }

    fn autoplay_running(&self) -> bool {
        self.home
            .hero
            .as_ref()
            .is_some_and(|h| h.autoplay() == Autoplay::Running)
    }

    fn autoplay_tick(&mut self) {
        let advanced = self.home.hero.as_mut().is_some_and(|h| h.autoplay_tick());
        if advanced {
            self.print_current_slide();
        }
    }

    fn print_current_slide(&self) {
        if let Some(hero) = &self.home.hero {
            if let Some(slide) = hero.views().get(hero.current_index()) {
                console::print_slide(slide, self.image_base);
            }
        }
    }

    fn print_home(&self) {
        if let Some(hero) = &self.home.hero {
            console::print_hero(hero, self.image_base);
        }
        self.print_rows();
    }

    fn print_rows(&self) {
        for (index, row) in self.home.rows.iter().enumerate() {
            console::print_row(index, row);
        }
    }

    fn with_hero(&mut self, f: impl FnOnce(&mut Carousel<ConsolePlayer>)) {
        match self.home.hero.as_mut() {
            Some(hero) => {
                f(hero);
                self.print_current_slide();
            }
            None => println!("Nenhum destaque disponível"),
        }
    }

    fn with_row(&mut self, row: usize, f: impl FnOnce(&mut ScrollRow)) {
        match self.home.rows.get_mut(row) {
            Some(content) => {
                f(&mut content.scroll);
                console::print_row(row, content);
            }
            None => println!("no row {row}"),
        }
    }

    fn card_id(&self, row: usize, col: usize) -> Option<u64> {
        let id = self
            .home
            .rows
            .get(row)
            .and_then(|r| r.cards.get(col))
            .map(|c| c.item.id);
        if id.is_none() {
            println!("no card at {row} {col}");
        }
        id
    }

    fn featured_id(&self) -> Option<u64> {
        let id = self
            .home
            .hero
            .as_ref()
            .and_then(|h| h.current())
            .map(|s| s.item.id);
        if id.is_none() {
            println!("Nenhum destaque disponível");
        }
        id
    }

    fn print_modal(&self) {
        match self.modal.view() {
            Some(view) => console::print_modal(&view, self.image_base),
            None => println!("Detalhes indisponíveis"),
        }
    }

    async fn open(&mut self, id: u64) {
        open_details(self.catalog, &mut self.modal, id).await;
        self.print_modal();
    }

    async fn play(&mut self, id: u64) {
        if !play_title(self.catalog, &mut self.modal, id).await && self.modal.is_open() {
            println!("Trailer indisponível");
        }
        self.print_modal();
    }

    pub async fn handle(&mut self, command: Command) {
        tracing::debug!(?command, "browse command");
        match command {
            Command::Next => self.with_hero(Carousel::advance),
            Command::Prev => self.with_hero(Carousel::retreat),
            Command::Jump(index) => self.with_hero(|h| h.jump_to(index)),
            Command::Mute => self.with_hero(|h| {
                h.toggle_mute();
            }),
            Command::Info => {
                if let Some(id) = self.featured_id() {
                    self.open(id).await;
                }
            }
            Command::Watch => {
                if let Some(id) = self.featured_id() {
                    self.play(id).await;
                }
            }
            Command::Open { row, col } => {
                if let Some(id) = self.card_id(row, col) {
                    self.open(id).await;
                }
            }
            Command::Play { row, col } => {
                if let Some(id) = self.card_id(row, col) {
                    self.play(id).await;
                }
            }
            Command::Trailer => {
                if !self.modal.is_open() {
                    println!("nothing open");
                } else if !self.modal.play() {
                    println!("Trailer indisponível");
                } else {
                    self.print_modal();
                }
            }
            Command::Close(reason) => self.modal.close(reason),
            Command::Left(row) => self.with_row(row, ScrollRow::click_prev),
            Command::Right(row) => self.with_row(row, ScrollRow::click_next),
            Command::Hover { row, col } => self.with_row(row, |s| {
                s.card_entered(col);
            }),
            Command::Leave { row, col } => self.with_row(row, |s| s.card_left(col)),
            Command::Resize(width) => {
                for row in &mut self.home.rows {
                    row.scroll.resize(width);
                }
                self.print_rows();
            }
            Command::Find(text) => {
                let ticket = self.search.borrow_mut().input(&text);
                if let Some(ticket) = ticket {
                    dispatch(&self.search, self.catalog, ticket).await;
                }
                console::print_search(&self.search.borrow(), self.image_base);
            }
            Command::Pick(n) => {
                let hit = self.search.borrow().hit_views().into_iter().nth(n);
                match hit {
                    None => println!("no result {n}"),
                    Some(hit) if !hit.opens_details => println!("Apenas filmes têm detalhes"),
                    Some(hit) => {
                        self.search.borrow_mut().dismiss();
                        self.open(hit.id).await;
                    }
                }
            }
            Command::Dismiss => self.search.borrow_mut().dismiss(),
            Command::Show => self.print_home(),
            Command::Rows => self.print_rows(),
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
    }
}

/// Load the home page and read commands until `quit` or end of input.
pub async fn run<C: CatalogSource>(catalog: &C, config: &AppConfig) -> Result<(), MarqueeError> {
    let mut hero_factory = ConsoleFactory::new("hero");
    let home = load_home(catalog, &mut hero_factory, config).await;

    let mut browser = Browser::new(catalog, config, home);
    browser.start_trailers();
    browser.print_home();
    println!("{HELP}");

    let period = config.autoplay_interval();
    let mut autoplay = interval_at(Instant::now() + period, period);
    autoplay.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => browser.handle(command).await,
                    Err(message) => println!("{message}"),
                }
            }
            _ = autoplay.tick(), if browser.autoplay_running() => browser.autoplay_tick(),
        }
    }

    tracing::info!("browse session ended");
    Ok(())
}
