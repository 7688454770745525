pub mod streamwo;
