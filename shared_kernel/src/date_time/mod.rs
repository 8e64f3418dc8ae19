pub mod istanbul_date_time;
