use colored::*;

/// Console prints the agent's step-by-step trace with colored formatting
///
/// A disabled console prints nothing, so the agent can call it
/// unconditionally.
#[derive(Debug, Clone)]
pub struct Console {
    enabled: bool,
    step_color: Color,
    observation_color: Color,
}

impl Console {
    /// Create a new Console with default colors
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            step_color: Color::Green,
            observation_color: Color::Cyan,
        }
    }

    /// Announce the start of a run
    pub fn print_chain_start(&self) {
        if self.enabled {
            println!();
            println!("{}", "> Entering new AgentExecutor chain...".bold());
        }
    }

    /// Announce the end of a run
    pub fn print_chain_end(&self) {
        if self.enabled {
            println!();
            println!("{}", "> Finished chain.".bold());
        }
    }

    /// Print a raw model step
    pub fn print_step(&self, text: &str) {
        if self.enabled {
            println!("{}", text.color(self.step_color));
        }
    }

    /// Print a tool observation
    pub fn print_observation(&self, observation: &str, is_error: bool) {
        if !self.enabled {
            return;
        }
        if is_error {
            println!("{}", observation.red());
        } else {
            println!("{}", observation.color(self.observation_color));
        }
    }

    /// Print a system message (errors, info, etc.)
    pub fn print_system(&self, message: &str) {
        if self.enabled {
            println!("{} {}", "System:".yellow().bold(), message);
        }
    }

    /// Print an error message
    pub fn print_error(&self, error: &str) {
        if self.enabled {
            eprintln!("{} {}", "Error:".red().bold(), error);
        }
    }
}
