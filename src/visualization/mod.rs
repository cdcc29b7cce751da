pub mod emsim_vis3d;
