pub mod dashboard;

pub mod marks;

pub mod students;

pub mod subjects;

pub mod system;


pub use dashboard::configure_dashboard_routes;
pub use marks::configure_marks_routes;
pub use students::configure_students_routes;
pub use subjects::configure_subjects_routes;
pub use system::configure_system_routes;
