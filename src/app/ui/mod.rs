pub mod edit;
pub mod help;
pub mod notice;
pub mod question;
pub mod task_form;
pub mod task_table;
pub mod textarea;
pub mod utils;

pub use edit::EditScreen;
pub use help::HelpScreen;
pub use notice::Notice;
pub use question::Question;
pub use task_form::{FORM_HEIGHT, TaskForm};
pub use task_table::TaskTable;
pub use textarea::TextArea;

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::Block,
};

pub trait Dim {
    fn dim_bg(&mut self);
}

impl Dim for ratatui::Frame<'_> {
    fn dim_bg(&mut self) {
        self.render_widget(
            Block::default().style(
                Style::default()
                    .bg(Color::Rgb(0, 0, 0))
                    .add_modifier(Modifier::DIM),
            ),
            self.area(),
        );
    }
}
