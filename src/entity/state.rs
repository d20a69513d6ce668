use crate::dashboard::RankedTableView;

#[derive(Clone, Default, Debug)]
pub enum State {
    #[default]
    Start,
    ViewingDashboard {
        table: RankedTableView,
    },
}

impl State {
    // Table currently shown in this chat, if any
    pub fn table(&self) -> Option<&RankedTableView> {
        match self {
            State::ViewingDashboard { table } => Some(table),
            State::Start => None,
        }
    }
}
