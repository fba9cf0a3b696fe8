//! Text rendering of a page: the shell (navigation, title, error banner)
//! around whatever the router picked.

use inline_colorization::*;

use crate::dashboard::DashboardState;
use crate::models::DashboardSnapshot;
use crate::router::View;
use crate::state::ViewState;

pub const TITLE: &str = "WorkOS Auth Example";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Emit ANSI colors (error banner in red, headings in bold).
    pub color: bool,
}

pub fn render(
    state: &ViewState,
    view: &View,
    dashboard: Option<&DashboardState>,
    options: RenderOptions,
) -> Vec<String> {
    if matches!(view, View::Loading) {
        return vec!["Loading...".to_string()];
    }

    let mut lines = Vec::new();
    let mut nav = String::from("[Home]");
    if state.session.is_authenticated() {
        nav.push_str(" [Dashboard]");
    }
    lines.push(nav);
    lines.push(String::new());
    lines.push(heading(TITLE, options));
    if let Some(error) = &state.error {
        lines.push(if options.color {
            format!("{color_red}{}{color_reset}", error)
        } else {
            format!("! {}", error)
        });
    }
    lines.push(String::new());

    match view {
        View::SignIn => {
            lines.push("Please sign in to continue".to_string());
            lines.push("[Sign In]".to_string());
        }
        View::Welcome { user } => {
            lines.push(format!("Welcome, {}!", user.first_name));
            lines.push(format!("Email: {}", user.email));
            lines.push("[Sign Out]".to_string());
        }
        View::Dashboard => match dashboard {
            None | Some(DashboardState::Loading) => {
                lines.push("Loading dashboard...".to_string());
            }
            Some(DashboardState::Loaded(snapshot)) => {
                render_dashboard(snapshot, options, &mut lines);
            }
            // The banner carries the failure; nothing else to draw.
            Some(DashboardState::Failed) | Some(DashboardState::Redirected) => {}
        },
        View::Loading | View::Redirect { .. } | View::Unmatched => {}
    }

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

fn render_dashboard(snapshot: &DashboardSnapshot, options: RenderOptions, lines: &mut Vec<String>) {
    let user = &snapshot.user;
    let data = &snapshot.dashboard_data;

    lines.push(heading("Dashboard", options));
    lines.push(String::new());
    lines.push(heading("User Information", options));
    lines.push(format!("Name: {} {}", user.first_name, user.last_name));
    lines.push(format!("Email: {}", user.email));
    lines.push(String::new());
    lines.push(heading("Dashboard Statistics", options));
    lines.push(format!("Last Login: {}", data.last_login));
    lines.push(format!("Role: {}", data.role));
    lines.push(format!("Permissions: {}", data.permissions_display()));
    lines.push(format!("User ID: {}", user.id));
    lines.push(format!("User Email: {}", user.email));
    lines.push(format!("User First Name: {}", user.first_name));
    lines.push(format!("User Last Name: {}", user.last_name));
    lines.push(format!("Organization ID: {}", user.organization_id));
}

fn heading(text: &str, options: RenderOptions) -> String {
    if options.color {
        format!("{style_bold}{}{style_reset}", text)
    } else {
        text.to_string()
    }
}
