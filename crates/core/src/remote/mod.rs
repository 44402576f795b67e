pub mod supabase;
pub mod traits;
