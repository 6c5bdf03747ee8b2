use std::fmt::Write;

use weather_core::{ResultPanel, Screen, SearchPanel, View};

const WIDTH: usize = 44;
const LOADER: &str = "  ● ● ●  loading…";

/// Stand-in for the loading overlay while a primary fetch is in flight.
pub fn loading() {
    eprintln!("{LOADER}");
}

pub fn help() -> &'static str {
    "Type a city or country (min 3 letters); suggestions appear as you pause.\n\
     Commands: <enter> or :go search, :1-:5 pick a suggestion, :u toggle °C/°F,\n\
     :new new search, :help this text, :q quit."
}

pub fn view(view: &View) -> String {
    let panel = match &view.screen {
        Screen::Searching(panel) => search_panel(panel),
        Screen::Displaying(panel) => result_panel(panel),
    };

    if view.loading {
        format!("{LOADER}\n{panel}")
    } else {
        panel
    }
}

fn search_panel(panel: &SearchPanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Weather App");
    let _ = writeln!(out, "  Search: {}", panel.query);

    for (i, label) in panel.suggestions.iter().enumerate() {
        let _ = writeln!(out, "    :{} {}", i + 1, label);
    }
    if let Some(error) = &panel.error {
        let _ = writeln!(out, "  ! {error}");
    }
    out
}

fn result_panel(panel: &ResultPanel) -> String {
    let banner = panel.backdrop.glyph().repeat(WIDTH / 2);

    let mut out = String::new();
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "{:<w$}[{}]", panel.location, panel.unit, w = WIDTH - 4);
    let _ = writeln!(out, "  {}", panel.icon_url);
    let _ = writeln!(out, "  {}  {}", panel.temperature, panel.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "  Humidity    {}", panel.humidity);
    let _ = writeln!(out, "  Wind        {}", panel.wind);
    let _ = writeln!(out, "  Visibility  {}", panel.visibility);
    let _ = writeln!(out, "  Sunrise     {}", panel.sunrise);
    let _ = writeln!(out, "  Sunset      {}", panel.sunset);
    let _ = writeln!(out);
    let _ = writeln!(out, "  Feels like: {}", panel.feels_like);
    let _ = writeln!(out, "  Pressure: {}", panel.pressure);
    let _ = writeln!(out, "{banner}");
    out
}
