use serde::Deserialize;


#[derive(Deserialize, Debug, Default)]
pub struct Display {
    terminal_width: Option<usize>,
}


impl Display {
    pub fn get_terminal_width(&self) -> usize {
        return self.terminal_width.unwrap_or(75);
    }
}
