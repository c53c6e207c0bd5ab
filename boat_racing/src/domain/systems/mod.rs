pub mod ice_speed;
