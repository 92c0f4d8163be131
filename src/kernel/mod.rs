pub mod arithmetic;
pub mod capabilities;
pub mod dispatch;
pub mod intent;
pub mod journal;
pub mod workspace;
