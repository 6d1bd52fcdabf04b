// Draft and results endpoints backing the story-capture, assessment,
// dashboard, results and history views.

pub mod handlers;
