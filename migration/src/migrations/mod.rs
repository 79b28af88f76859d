pub mod m202505290001_create_users;
pub mod m202505290002_create_classes;
pub mod m202505290003_create_enrollments;
pub mod m202509080001_create_attendance;
pub mod m202509080002_create_leave_requests;
