pub mod attendance_flag;
pub mod attendance_record;
pub mod attendance_session;
pub mod class;
pub mod enrollment;
pub mod leave_request;
pub mod user;

pub use attendance_flag::Entity as AttendanceFlag;
pub use attendance_record::Entity as AttendanceRecord;
pub use attendance_session::Entity as AttendanceSession;
pub use class::Entity as Class;
pub use enrollment::Entity as Enrollment;
pub use leave_request::Entity as LeaveRequest;
pub use user::Entity as User;
