use hypertext::prelude::*;

use crate::engine::MatchStatus;

pub struct StatusBadge(pub MatchStatus);

impl Renderable for StatusBadge {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        let (class, label) = match self.0 {
            MatchStatus::Scheduled => ("badge bg-secondary", "Scheduled"),
            MatchStatus::InProgress => ("badge bg-warning", "In Progress"),
            MatchStatus::Completed => ("badge bg-success", "Completed"),
        };

        maud!({
            span class=(class) {
                (label)
            }
        })
        .render_to(buffer);
    }
}
