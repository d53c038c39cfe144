pub mod case;
pub mod chart;
pub mod country;
pub mod population;
pub mod response;
pub mod table;
