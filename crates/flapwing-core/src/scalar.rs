/// Every quantity in the controller is single precision, matching tracker output.
pub type Scalar = f32;
