use job_board::workflows::listings::{BoardView, FilterFacets, Job, JobBoard, ViewState};

pub(crate) fn board(view: BoardView<'_>) {
    match view {
        BoardView::Idle | BoardView::Loading => println!("Loading..."),
        BoardView::Unavailable(_) => println!("Job listings are unavailable right now."),
        BoardView::NoMatches => println!("No jobs available based on your filters."),
        BoardView::Ranked(ranked) => {
            if !ranked.skill_matched.is_empty() {
                println!("Jobs Matching Your Skills");
                ranked.skill_matched.iter().for_each(|job| print_job(job));
            }
            if !ranked.other.is_empty() {
                if !ranked.skill_matched.is_empty() {
                    println!();
                }
                println!("Other Jobs");
                ranked.other.iter().for_each(|job| print_job(job));
            }
        }
    }
}

fn print_job(job: &Job) {
    println!("  [{}] {}", job.id, job.headline());
    println!("      Location: {}", job.location);
    if !job.experience.is_empty() {
        println!("      Experience: {}", job.experience);
    }
    if !job.skills.is_empty() {
        let skills: Vec<&str> = job.skills.iter().map(String::as_str).collect();
        println!("      Skills: {}", skills.join(", "));
    }
}

pub(crate) fn facets(facets: &FilterFacets) {
    println!("Filter options");
    println!("  Companies: {}", facets.companies.join(", "));
    println!("  Locations: {}", facets.locations.join(", "));
    println!("  Skills: {}", facets.skills.join(", "));
    println!();
}

pub(crate) fn confirmation(state: &ViewState) {
    let props = state.confirmation_props();
    if props.is_open {
        println!("{}", props.message);
    }
}

pub(crate) fn unavailable(board: &JobBoard) {
    board.with_board(|view| {
        if let BoardView::Unavailable(reason) = &view {
            tracing::debug!(%reason, "job collection unavailable");
        }
        self::board(view);
    });
}
